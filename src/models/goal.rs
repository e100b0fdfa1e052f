/// Snapshot of total spend measured against the monthly goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalStatus {
    pub goal: f64,
    pub total: f64,
    pub remaining: f64,
    pub exceeded: bool,
}

impl GoalStatus {
    pub fn new(goal: f64, total: f64) -> Self {
        Self {
            goal,
            total,
            remaining: goal - total,
            // A zero goal means "no goal set" and never warns.
            exceeded: total > goal && goal > 0.0,
        }
    }
}

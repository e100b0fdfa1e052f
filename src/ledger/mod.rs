use anyhow::Result;
use chrono::Utc;

use crate::models::{Expense, GoalStatus};
use crate::store::{LedgerState, Store};

/// Presentation seam: the event loop pushes these notifications after every
/// ledger mutation. The ledger itself has no dependency on the UI; data only
/// flows back in through `add`/`remove`/`set_goal`.
pub(crate) trait ViewPort {
    fn ledger_changed(&mut self, ledger: &Ledger);
    fn goal_changed(&mut self, ledger: &Ledger);
}

/// The ordered expense list plus the monthly goal, mirrored to the injected
/// store after every mutation. Insertion order is display order.
pub(crate) struct Ledger {
    expenses: Vec<Expense>,
    monthly_goal: f64,
    store: Box<dyn Store>,
}

impl Ledger {
    /// Read state once from the store; an absent store yields an empty
    /// ledger with no goal.
    pub(crate) fn load(store: Box<dyn Store>) -> Result<Self> {
        let state = store.load()?;
        Ok(Self {
            expenses: state.expenses,
            monthly_goal: state.monthly_goal,
            store,
        })
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn monthly_goal(&self) -> f64 {
        self.monthly_goal
    }

    /// Record an expense from raw field values. The amount is parsed as a
    /// decimal; a parse failure stores the NaN sentinel instead of rejecting
    /// the entry. No other validation happens.
    pub(crate) fn add(
        &mut self,
        description: &str,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Result<Expense> {
        let expense = Expense {
            id: self.next_id(),
            description: description.to_string(),
            amount: amount.trim().parse::<f64>().unwrap_or(f64::NAN),
            category: category.to_string(),
            date: date.to_string(),
        };
        self.expenses.push(expense.clone());
        self.persist()?;
        Ok(expense)
    }

    /// Remove every record matching `id`. A miss is a silent no-op, so the
    /// call is idempotent.
    pub(crate) fn remove(&mut self, id: i64) -> Result<()> {
        self.expenses.retain(|e| e.id != id);
        self.persist()
    }

    /// Set the monthly goal from raw input; non-numeric input means "no
    /// goal" (zero). Rust's float parser accepts "NaN" and "inf", which are
    /// not numbers here either.
    pub(crate) fn set_goal(&mut self, value: &str) -> Result<()> {
        self.monthly_goal = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|g| g.is_finite())
            .unwrap_or(0.0);
        self.persist()
    }

    /// Summed spend per category label, in first-seen order.
    pub(crate) fn by_category(&self) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for exp in &self.expenses {
            match totals.iter_mut().find(|(name, _)| *name == exp.category) {
                Some((_, sum)) => *sum += exp.amount,
                None => totals.push((exp.category.clone(), exp.amount)),
            }
        }
        totals
    }

    /// Summed spend per "Mon YYYY" label, in first-seen order. Expenses with
    /// unparseable dates land in a shared "Invalid Date" bucket.
    pub(crate) fn by_month(&self) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for exp in &self.expenses {
            let label = exp.month_label();
            match totals.iter_mut().find(|(name, _)| *name == label) {
                Some((_, sum)) => *sum += exp.amount,
                None => totals.push((label, exp.amount)),
            }
        }
        totals
    }

    /// Sum of all amounts. A stored NaN amount poisons the total; that quirk
    /// is part of the contract, not corrected here.
    pub(crate) fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub(crate) fn goal_status(&self) -> GoalStatus {
        GoalStatus::new(self.monthly_goal, self.total_spent())
    }

    /// Ids are current Unix milliseconds (the source used `Date.now()`),
    /// bumped past any existing id so same-millisecond adds stay unique.
    fn next_id(&self) -> i64 {
        let mut id = Utc::now().timestamp_millis();
        while self.expenses.iter().any(|e| e.id == id) {
            id += 1;
        }
        id
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&LedgerState {
            expenses: self.expenses.clone(),
            monthly_goal: self.monthly_goal,
        })
    }
}

#[cfg(test)]
mod tests;

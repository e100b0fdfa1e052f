mod expense;
mod goal;

pub use expense::Expense;
pub use goal::GoalStatus;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use chrono::Local;

use crate::ledger::{Ledger, ViewPort};
use crate::models::{Expense, GoalStatus};
use crate::ui::theme;

/// How long the goal-exceeded banner stays on screen.
const ALERT_TTL: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, description: String },
}

/// The add-expense form: four free-text fields, none validated. A bad
/// amount becomes NaN and a bad date buckets under "Invalid Date", both
/// downstream of here.
#[derive(Debug, Clone, Default)]
pub(crate) struct AddForm {
    pub(crate) fields: [String; 4],
    pub(crate) active: usize,
}

impl AddForm {
    pub(crate) const LABELS: [&'static str; 4] = ["Description", "Amount", "Category", "Date"];

    pub(crate) fn reset(&mut self) {
        self.fields = Default::default();
        // Date defaults to today, like a fresh form
        self.fields[3] = Local::now().format("%Y-%m-%d").to_string();
        self.active = 0;
    }

    pub(crate) fn active_field_mut(&mut self) -> &mut String {
        &mut self.fields[self.active]
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.fields.len();
    }

    pub(crate) fn prev_field(&mut self) {
        self.active = if self.active == 0 {
            self.fields.len() - 1
        } else {
            self.active - 1
        };
    }

    pub(crate) fn on_last_field(&self) -> bool {
        self.active == self.fields.len() - 1
    }
}

/// Transient banner raised when spend exceeds a positive goal. Cosmetic
/// only; expiry never touches the ledger.
#[derive(Debug, Clone)]
pub(crate) struct Alert {
    pub(crate) message: String,
    pub(crate) expires_at: Instant,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) theme: theme::Mode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Derived views, recomputed on every change notification
    pub(crate) expenses: Vec<Expense>,
    pub(crate) by_category: Vec<(String, f64)>,
    pub(crate) by_month: Vec<(String, f64)>,
    pub(crate) goal_status: GoalStatus,

    // Expense table cursor
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Add form
    pub(crate) form: AddForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Goal-exceeded banner
    pub(crate) alert: Option<Alert>,

    // Mouse drag origin for the swipe-to-delete gesture
    pub(crate) drag_origin: Option<(u16, u16)>,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            theme: theme::Mode::default(),
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            expenses: Vec::new(),
            by_category: Vec::new(),
            by_month: Vec::new(),
            goal_status: GoalStatus::new(0.0, 0.0),

            expense_index: 0,
            expense_scroll: 0,

            form: AddForm::default(),

            pending_action: None,
            confirm_message: String::new(),

            alert: None,

            drag_origin: None,

            visible_rows: 20,
        }
    }

    pub(crate) fn palette(&self) -> &'static theme::Palette {
        self.theme.palette()
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// The expense under the cursor, if any.
    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.expense_index)
    }

    /// Called on every poll tick; drops the banner once its time is up.
    pub(crate) fn tick(&mut self) {
        if let Some(alert) = &self.alert {
            if Instant::now() >= alert.expires_at {
                self.alert = None;
            }
        }
    }

    fn raise_alert_if_exceeded(&mut self) {
        if self.goal_status.exceeded {
            self.alert = Some(Alert {
                message: "You exceeded your monthly goal!".into(),
                expires_at: Instant::now() + ALERT_TTL,
            });
        }
    }
}

impl ViewPort for App {
    fn ledger_changed(&mut self, ledger: &Ledger) {
        self.expenses = ledger.expenses().to_vec();
        self.by_category = ledger.by_category();
        self.by_month = ledger.by_month();
        self.goal_status = ledger.goal_status();
        if self.expense_index >= self.expenses.len() && !self.expenses.is_empty() {
            self.expense_index = self.expenses.len() - 1;
        }
        self.raise_alert_if_exceeded();
    }

    fn goal_changed(&mut self, ledger: &Ledger) {
        self.goal_status = ledger.goal_status();
        self.raise_alert_if_exceeded();
    }
}

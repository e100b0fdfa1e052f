use std::collections::HashMap;
use std::sync::LazyLock;

use crate::ledger::{Ledger, ViewPort};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::util::format_amount;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-01-05 4.50 Food Coffee)",
        cmd_add,
        r
    );
    register_command!("a", "Open the add-expense form", cmd_add, r);
    register_command!(
        "delete",
        "Delete selected expense",
        cmd_delete,
        r
    );
    register_command!(
        "goal",
        "Set monthly goal (e.g. :goal 500)",
        cmd_goal,
        r
    );
    register_command!("g", "Set monthly goal (e.g. :g 500)", cmd_goal, r);
    register_command!("theme", "Toggle light/dark theme", cmd_theme, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(());
    }

    let (name, args) = match input.split_once(' ') {
        Some((name, args)) => (name, args.trim()),
        None => (input, ""),
    };

    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args, app, ledger),
        None => {
            app.set_status(format!("Unknown command: {name} (:help for a list)"));
            Ok(())
        }
    }
}

// ── Command handlers ─────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        // No args opens the interactive form
        app.screen = Screen::Expenses;
        app.form.reset();
        app.input_mode = InputMode::Editing;
        return Ok(());
    }

    // :add <date> <amount> <category> <description...>
    let parts: Vec<&str> = args.splitn(4, ' ').collect();
    if parts.len() < 4 {
        app.set_status("Usage: :add <date> <amount> <category> <description>");
        return Ok(());
    }

    let expense = ledger.add(parts[3], parts[1], parts[2], parts[0])?;
    app.ledger_changed(ledger);
    app.set_status(format!(
        "Added: {} ({})",
        expense.description,
        format_amount(expense.amount)
    ));
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses {
        app.screen = Screen::Expenses;
    }
    let (id, description) = match app.selected_expense() {
        Some(expense) => (
            expense.id,
            if expense.description.is_empty() {
                "(no description)".to_string()
            } else {
                expense.description.clone()
            },
        ),
        None => {
            app.set_status("No expense selected");
            return Ok(());
        }
    };
    app.confirm_message = format!("Delete '{description}'?");
    app.pending_action = Some(PendingAction::DeleteExpense { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, ledger: &mut Ledger) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :goal <amount>. Example: :goal 500");
        return Ok(());
    }

    ledger.set_goal(args)?;
    app.goal_changed(ledger);
    let goal = ledger.monthly_goal();
    if goal == 0.0 {
        app.set_status("Monthly goal cleared");
    } else {
        app.set_status(format!("Monthly goal set to {}", format_amount(goal)));
    }
    Ok(())
}

fn cmd_theme(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.theme = app.theme.toggle();
    app.set_status(format!("Theme: {}", app.theme));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &mut Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

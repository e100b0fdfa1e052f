use anyhow::Result;

use crate::ledger::Ledger;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], ledger),
        "remove" | "rm" => cli_remove(&args[2..], ledger),
        "goal" => cli_goal(&args[2..], ledger),
        "list" | "ls" => cli_list(ledger),
        "summary" | "s" => cli_summary(ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI — local-only expense tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <date> <amount> <cat> <desc>    Record an expense");
    println!("  remove <id>                         Delete an expense by id");
    println!("  goal <amount>                       Set the monthly goal (0 clears it)");
    println!("  list                                List all expenses");
    println!("  summary                             Print totals, aggregates, goal status");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!("Usage: spendtui add <date> <amount> <category> <description...>");
    }

    let date = &args[0];
    let amount = &args[1];
    let category = &args[2];
    let description = args[3..].join(" ");

    let expense = ledger.add(&description, amount, category, date)?;
    println!(
        "Added {} {} [{}] {} (id {})",
        expense.date,
        format_amount(expense.amount),
        expense.category,
        expense.description,
        expense.id
    );
    Ok(())
}

fn cli_remove(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(id_arg) = args.first() else {
        anyhow::bail!("Usage: spendtui remove <id>");
    };
    let id: i64 = id_arg
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid id: {id_arg}"))?;

    let before = ledger.expenses().len();
    ledger.remove(id)?;
    // Deleting a nonexistent id is a no-op, but say so
    if ledger.expenses().len() < before {
        println!("Removed expense {id}");
    } else {
        println!("No expense with id {id}");
    }
    Ok(())
}

fn cli_goal(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let Some(value) = args.first() else {
        anyhow::bail!("Usage: spendtui goal <amount>");
    };

    ledger.set_goal(value)?;
    let goal = ledger.monthly_goal();
    if goal == 0.0 {
        println!("Monthly goal cleared");
    } else {
        println!("Monthly goal set to {}", format_amount(goal));
    }
    Ok(())
}

fn cli_list(ledger: &mut Ledger) -> Result<()> {
    let expenses = ledger.expenses();
    if expenses.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }

    println!(
        "{:<15} {:<12} {:<28} {:<16} Amount",
        "ID", "Date", "Description", "Category"
    );
    println!("{}", "─".repeat(84));
    for exp in expenses {
        println!(
            "{:<15} {:<12} {:<28} {:<16} {}",
            exp.id,
            exp.date,
            exp.description,
            exp.category,
            format_amount(exp.amount),
        );
    }
    Ok(())
}

fn cli_summary(ledger: &mut Ledger) -> Result<()> {
    let status = ledger.goal_status();

    println!("SpendTUI — Summary");
    println!("{}", "─".repeat(40));
    println!("  Goal:       {}", format_amount(status.goal));
    println!("  Spent:      {}", format_amount(status.total));
    println!("  Remaining:  {}", format_amount(status.remaining));
    println!("  Expenses:   {}", ledger.expenses().len());
    if status.exceeded {
        println!();
        println!("  ⚠ You exceeded your monthly goal!");
    }

    let by_category = ledger.by_category();
    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (name, amount) in &by_category {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }

    let by_month = ledger.by_month();
    if !by_month.is_empty() {
        println!();
        println!("Spending by Month:");
        for (label, amount) in &by_month {
            println!("  {label:<24} {}", format_amount(*amount));
        }
    }

    Ok(())
}

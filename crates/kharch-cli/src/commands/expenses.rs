//! Expense command implementations

use std::path::Path;

use anyhow::{Context, Result};
use kharch_core::NewExpense;

use super::{load_ledger, open_vault, parse_date_arg, truncate};

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    data_dir: Option<&Path>,
    amount: Option<f64>,
    category: Option<String>,
    sub_category: Option<String>,
    vendor: Option<String>,
    date: Option<&str>,
    payment_mode: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    let date = date.map(parse_date_arg).transpose()?;
    let input = NewExpense {
        date,
        vendor,
        category,
        sub_category,
        amount,
        payment_mode,
        notes,
    };

    let expense = ledger.add_expense(input).context("Failed to add expense")?;
    ledger.persist(&vault)?;

    println!(
        "✅ Recorded {} at {} ({}, {})",
        format_amount(expense.amount),
        expense.vendor,
        expense.category,
        expense.payment_mode
    );
    println!("   id: {}", expense.id);

    Ok(())
}

pub fn cmd_list(data_dir: Option<&Path>, limit: usize) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let ledger = load_ledger(&vault)?;

    let expenses = ledger.expenses_by_date_desc();
    if expenses.is_empty() {
        println!("No expenses recorded yet. Add one with:");
        println!("  kharch add --amount 250 --category food");
        return Ok(());
    }

    println!();
    println!("💸 Recent Expenses");
    println!("   ─────────────────────────────────────────────────────────────");
    for expense in expenses.iter().take(limit) {
        println!(
            "   {}  {:10}  {:<20} {:<15} {:>10}",
            // Synced ids can come from other clients; do not assume length
            expense.id.get(..8).unwrap_or(&expense.id),
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.vendor, 20),
            expense.category,
            format_amount(expense.amount)
        );
    }
    if expenses.len() > limit {
        println!();
        println!("   Showing {} of {} expenses.", limit, expenses.len());
    }

    Ok(())
}

pub fn cmd_delete(data_dir: Option<&Path>, id: &str) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    let known = ledger.expenses().iter().any(|e| e.id == id);
    ledger.delete_expense(id);
    ledger.persist(&vault)?;

    if known {
        println!("✅ Deleted expense {}", id);
    } else {
        println!("No expense with id {} (nothing to delete).", id);
    }

    Ok(())
}

pub(crate) fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

//! Income and salary command implementations

use std::path::Path;

use anyhow::{Context, Result};
use kharch_core::NewIncomeEntry;

use super::expenses::format_amount;
use super::{load_ledger, open_vault, parse_date_arg, truncate};

pub fn cmd_income_add(
    data_dir: Option<&Path>,
    amount: f64,
    source: Option<String>,
    date: Option<&str>,
) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    let date = date.map(parse_date_arg).transpose()?;
    let input = NewIncomeEntry {
        date,
        source,
        amount: Some(amount),
    };

    let entry = ledger.add_income(input).context("Failed to add income")?;
    ledger.persist(&vault)?;

    println!(
        "✅ Recorded income {} from {}",
        format_amount(entry.amount),
        entry.source
    );
    println!("   id: {}", entry.id);

    Ok(())
}

pub fn cmd_income_list(data_dir: Option<&Path>) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let ledger = load_ledger(&vault)?;

    let entries = ledger.income_entries();
    if entries.is_empty() {
        println!("No income entries recorded. Add one with:");
        println!("  kharch income add --amount 3000 --source Freelance");
        return Ok(());
    }

    println!();
    println!("💰 Income Entries");
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in entries {
        println!(
            "   {}  {:10}  {:<25} {:>10}",
            entry.id.get(..8).unwrap_or(&entry.id),
            entry.date.format("%Y-%m-%d"),
            truncate(&entry.source, 25),
            format_amount(entry.amount)
        );
    }

    Ok(())
}

pub fn cmd_income_delete(data_dir: Option<&Path>, id: &str) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    let known = ledger.income_entries().iter().any(|e| e.id == id);
    ledger.delete_income(id);
    ledger.persist(&vault)?;

    if known {
        println!("✅ Deleted income entry {}", id);
    } else {
        println!("No income entry with id {} (nothing to delete).", id);
    }

    Ok(())
}

pub fn cmd_salary(data_dir: Option<&Path>, value: Option<f64>) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;

    match value {
        Some(salary) => {
            anyhow::ensure!(salary >= 0.0, "Salary cannot be negative");
            ledger.set_salary(salary);
            ledger.persist(&vault)?;
            println!("✅ Monthly salary set to {}", format_amount(salary));
        }
        None => {
            println!("Monthly salary: {}", format_amount(ledger.salary()));
        }
    }

    Ok(())
}

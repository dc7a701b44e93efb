//! Summary command implementation

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Utc};
use kharch_core::{month_summary, overview};

use super::expenses::format_amount;
use super::{load_ledger, open_vault};

pub fn cmd_summary(data_dir: Option<&Path>, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let vault = open_vault(data_dir)?;
    let ledger = load_ledger(&vault)?;

    let now = Utc::now();
    let year = year.unwrap_or_else(|| now.year());
    let month = month.unwrap_or_else(|| now.month());
    anyhow::ensure!((1..=12).contains(&month), "Month must be between 1 and 12");

    let summary = month_summary(ledger.expenses(), year, month);
    let overview = overview(ledger.salary(), ledger.income_entries(), summary.total);

    println!();
    println!("📊 Summary for {}-{:02}", year, month);
    println!("   ─────────────────────────────────────────────────────────────");
    if summary.categories.is_empty() {
        println!("   No expenses this month.");
    } else {
        for entry in &summary.categories {
            println!(
                "   {:<20} {:>12}",
                entry.category,
                format_amount(entry.amount)
            );
        }
        println!("   ─────────────────────────────────────────────────────────────");
        println!("   {:<20} {:>12}", "TOTAL", format_amount(summary.total));
    }

    println!();
    println!("   Income:    {}", format_amount(overview.total_income));
    println!("   Spent:     {}", format_amount(overview.total_expense));
    println!("   Balance:   {}", format_amount(overview.balance));
    println!("   Spent %:   {:.1}%", overview.spending_percentage);

    Ok(())
}

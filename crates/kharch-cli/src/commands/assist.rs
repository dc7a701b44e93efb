//! AI entry and insights command implementations

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use kharch_core::ai::{AiClient, ExpenseAi, ExtractInput};
use kharch_core::NewExpense;

use super::expenses::format_amount;
use super::{load_ledger, open_vault};

pub async fn cmd_assist(data_dir: Option<&Path>, text: &str) -> Result<()> {
    anyhow::ensure!(!text.trim().is_empty(), "Description cannot be empty");

    let ai = AiClient::from_env().context(
        "AI backend is not configured (set GEMINI_API_KEY, or AI_BACKEND=mock for testing)",
    )?;

    println!("🤖 Extracting expense from: \"{}\"", text);

    let extracted = ai
        .extract_expense(&ExtractInput::Text(text.to_string()))
        .await
        .context("Expense extraction failed")?;

    let amount = match extracted.amount {
        Some(amount) if amount > 0.0 => amount,
        _ => anyhow::bail!(
            "Could not determine the expense amount, please include it explicitly"
        ),
    };

    let date = extracted
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt));

    let vault = open_vault(data_dir)?;
    let mut ledger = load_ledger(&vault)?;
    let expense = ledger.add_expense(NewExpense {
        date,
        vendor: extracted.vendor,
        category: extracted.category,
        sub_category: extracted.sub_category,
        amount: Some(amount),
        payment_mode: extracted.payment_mode,
        notes: extracted.notes,
    })?;
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

pub async fn cmd_insights(data_dir: Option<&Path>) -> Result<()> {
    let ai = AiClient::from_env().context(
        "AI backend is not configured (set GEMINI_API_KEY, or AI_BACKEND=mock for testing)",
    )?;

    let vault = open_vault(data_dir)?;
    let ledger = load_ledger(&vault)?;
    anyhow::ensure!(
        !ledger.expenses().is_empty(),
        "No expenses to analyze yet"
    );

    println!("🤖 Analyzing recent spending...");

    let insight = ai
        .savings_insights(ledger.expenses())
        .await
        .context("Savings analysis failed")?;

    println!();
    println!("💡 Savings Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for suggestion in &insight.suggestions {
        println!("   • {}", suggestion);
    }
    if !insight.avoidable_expenses.is_empty() {
        println!();
        println!("   Avoidable: {}", insight.avoidable_expenses);
    }
    if insight.estimated_savings > 0.0 {
        println!(
            "   Estimated monthly savings: {}",
            format_amount(insight.estimated_savings)
        );
    }

    Ok(())
}

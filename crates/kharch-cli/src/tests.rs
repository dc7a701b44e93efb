//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use chrono::Utc;
use kharch_core::{Category, Expense, FileVault, IncomeEntry, Ledger, Snapshot};
use tempfile::TempDir;

use crate::commands::{self, truncate};

fn setup_test_vault() -> (FileVault, TempDir) {
    let dir = TempDir::new().unwrap();
    let vault = FileVault::open(dir.path()).unwrap();
    (vault, dir)
}

// ========== Expense Command Tests ==========

#[test]
fn test_cmd_add_persists_expense() {
    let (vault, dir) = setup_test_vault();

    let result = commands::cmd_add(
        Some(dir.path()),
        Some(250.0),
        Some("food".to_string()),
        None,
        Some("Cafe".to_string()),
        Some("2025-06-10"),
        Some("UPI".to_string()),
        None,
    );
    assert!(result.is_ok());

    let ledger = Ledger::load(&vault).unwrap();
    assert_eq!(ledger.expenses().len(), 1);
    let expense = &ledger.expenses()[0];
    assert_eq!(expense.amount, 250.0);
    assert_eq!(expense.category.as_str(), "FOOD");
    assert_eq!(expense.vendor, "Cafe");
    assert_eq!(expense.payment_mode, "UPI");
}

#[test]
fn test_cmd_add_rejects_negative_amount() {
    let (_vault, dir) = setup_test_vault();

    let result = commands::cmd_add(
        Some(dir.path()),
        Some(-10.0),
        None,
        None,
        None,
        None,
        None,
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_add_rejects_bad_date() {
    let (_vault, dir) = setup_test_vault();

    let result = commands::cmd_add(
        Some(dir.path()),
        Some(10.0),
        None,
        None,
        None,
        Some("June 10"),
        None,
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_list_and_delete() {
    let (vault, dir) = setup_test_vault();

    commands::cmd_add(
        Some(dir.path()),
        Some(100.0),
        None,
        None,
        None,
        None,
        None,
        None,
    )
    .unwrap();

    assert!(commands::cmd_list(Some(dir.path()), 20).is_ok());

    let ledger = Ledger::load(&vault).unwrap();
    let id = ledger.expenses()[0].id.clone();
    assert!(commands::cmd_delete(Some(dir.path()), &id).is_ok());

    let ledger = Ledger::load(&vault).unwrap();
    assert!(ledger.expenses().is_empty());
}

#[test]
fn test_cmd_list_handles_short_synced_ids() {
    // Snapshots written by other clients may use ids shorter than 8 bytes
    let (vault, dir) = setup_test_vault();

    let mut ledger = Ledger::new();
    ledger.restore(Snapshot {
        expenses: vec![Expense {
            id: "e1".to_string(),
            date: Utc::now(),
            vendor: "Grocer".to_string(),
            category: Category::Food,
            sub_category: None,
            amount: 100.0,
            payment_mode: "Cash".to_string(),
            notes: String::new(),
        }],
        income_entries: vec![IncomeEntry {
            id: "i1".to_string(),
            date: Utc::now(),
            source: "Freelance".to_string(),
            amount: 3000.0,
        }],
        salary: 22000.0,
        last_updated: Utc::now(),
    });
    ledger.persist(&vault).unwrap();

    assert!(commands::cmd_list(Some(dir.path()), 20).is_ok());
    assert!(commands::cmd_income_list(Some(dir.path())).is_ok());
}

#[test]
fn test_cmd_delete_unknown_id_is_ok() {
    let (_vault, dir) = setup_test_vault();
    assert!(commands::cmd_delete(Some(dir.path()), "no-such-id").is_ok());
}

// ========== Income and Salary Tests ==========

#[test]
fn test_cmd_income_add_and_delete() {
    let (vault, dir) = setup_test_vault();

    commands::cmd_income_add(
        Some(dir.path()),
        3000.0,
        Some("Freelance".to_string()),
        None,
    )
    .unwrap();

    let ledger = Ledger::load(&vault).unwrap();
    assert_eq!(ledger.income_entries().len(), 1);
    assert_eq!(ledger.income_entries()[0].source, "Freelance");

    let id = ledger.income_entries()[0].id.clone();
    commands::cmd_income_delete(Some(dir.path()), &id).unwrap();

    let ledger = Ledger::load(&vault).unwrap();
    assert!(ledger.income_entries().is_empty());
}

#[test]
fn test_cmd_salary_set() {
    let (vault, dir) = setup_test_vault();

    commands::cmd_salary(Some(dir.path()), Some(30000.0)).unwrap();

    let ledger = Ledger::load(&vault).unwrap();
    assert_eq!(ledger.salary(), 30000.0);
}

#[test]
fn test_cmd_salary_rejects_negative() {
    let (_vault, dir) = setup_test_vault();
    assert!(commands::cmd_salary(Some(dir.path()), Some(-1.0)).is_err());
}

// ========== Summary and Export Tests ==========

#[test]
fn test_cmd_summary_runs() {
    let (_vault, dir) = setup_test_vault();

    commands::cmd_add(
        Some(dir.path()),
        Some(500.0),
        Some("food".to_string()),
        None,
        None,
        Some("2025-06-10"),
        None,
        None,
    )
    .unwrap();

    assert!(commands::cmd_summary(Some(dir.path()), Some(2025), Some(6)).is_ok());
}

#[test]
fn test_cmd_summary_rejects_bad_month() {
    let (_vault, dir) = setup_test_vault();
    assert!(commands::cmd_summary(Some(dir.path()), Some(2025), Some(13)).is_err());
}

#[test]
fn test_cmd_export_writes_file() {
    let (_vault, dir) = setup_test_vault();

    commands::cmd_add(
        Some(dir.path()),
        Some(120.5),
        Some("food".to_string()),
        None,
        Some("Grocer".to_string()),
        Some("2025-06-10"),
        None,
        None,
    )
    .unwrap();

    let output = dir.path().join("out.csv");
    commands::cmd_export(
        Some(dir.path()),
        "2025-06-01",
        "2025-06-30",
        false,
        Some(&output),
    )
    .unwrap();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("Date,Day,Vendor,Category,Sub-Category,Amount (INR),Payment Mode"));
    assert!(csv.contains("Grocer"));
}

#[test]
fn test_cmd_export_empty_range_writes_nothing() {
    let (_vault, dir) = setup_test_vault();

    let output = dir.path().join("out.csv");
    commands::cmd_export(
        Some(dir.path()),
        "2020-01-01",
        "2020-01-31",
        false,
        Some(&output),
    )
    .unwrap();

    assert!(!output.exists());
}

#[test]
fn test_cmd_export_rejects_reversed_range() {
    let (_vault, dir) = setup_test_vault();
    let result = commands::cmd_export(Some(dir.path()), "2025-06-30", "2025-06-01", false, None);
    assert!(result.is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer string", 10), "a much ...");
}

#[test]
fn test_truncate_multibyte_boundary() {
    // A multibyte char straddling the cut must back up, not panic
    let name = format!("{}₹₹₹", "a".repeat(16));
    assert_eq!(truncate(&name, 20), format!("{}...", "a".repeat(16)));
    assert_eq!(truncate("₹₹₹₹₹₹₹₹", 10), "₹₹...");
}

#[test]
fn test_parse_date_arg() {
    let parsed = commands::parse_date_arg("2025-06-10").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-06-10T00:00:00+00:00");
    assert!(commands::parse_date_arg("10/06/2025").is_err());
}

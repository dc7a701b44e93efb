//! In-memory record store for expenses, income, and salary
//!
//! The ledger owns all records. Callers persist it to a [`FileVault`] after
//! each accepted mutation and push the resulting snapshot to the remote
//! vault out of band.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Category, Expense, IncomeEntry, NewExpense, NewIncomeEntry, Snapshot};
use crate::storage::{self, FileVault};

/// Salary assumed until the user sets their own
pub const DEFAULT_SALARY: f64 = 22000.0;

const DEFAULT_VENDOR: &str = "Unknown Vendor";
const DEFAULT_PAYMENT_MODE: &str = "Cash";

#[derive(Debug, Clone)]
pub struct Ledger {
    expenses: Vec<Expense>,
    income_entries: Vec<IncomeEntry>,
    salary: f64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            income_entries: Vec::new(),
            salary: DEFAULT_SALARY,
        }
    }

    /// Load ledger state from a vault, falling back to defaults for missing
    /// keys
    pub fn load(vault: &FileVault) -> Result<Self> {
        let expenses = match vault.get(storage::KEY_EXPENSES)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let income_entries = match vault.get(storage::KEY_INCOME_ENTRIES)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let salary = match vault.get(storage::KEY_SALARY)? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::InvalidData(format!("Invalid stored salary: {}", raw)))?,
            None => DEFAULT_SALARY,
        };

        Ok(Self {
            expenses,
            income_entries,
            salary,
        })
    }

    /// Write the full ledger state to a vault
    pub fn persist(&self, vault: &FileVault) -> Result<()> {
        vault.put(
            storage::KEY_EXPENSES,
            &serde_json::to_string(&self.expenses)?,
        )?;
        vault.put(
            storage::KEY_INCOME_ENTRIES,
            &serde_json::to_string(&self.income_entries)?,
        )?;
        vault.put(storage::KEY_SALARY, &self.salary.to_string())?;
        Ok(())
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses newest first, for table views
    pub fn expenses_by_date_desc(&self) -> Vec<Expense> {
        let mut sorted = self.expenses.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn income_entries(&self) -> &[IncomeEntry] {
        &self.income_entries
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn set_salary(&mut self, salary: f64) {
        self.salary = salary;
    }

    /// Record an expense, applying defaults for missing fields
    ///
    /// Defaults: date now, vendor "Unknown Vendor", amount 0, payment mode
    /// "Cash", empty notes. The category label is normalized. Negative
    /// amounts are rejected; validation happens here, not in aggregation.
    pub fn add_expense(&mut self, input: NewExpense) -> Result<Expense> {
        let amount = input.amount.unwrap_or(0.0);
        if amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Expense amount must not be negative: {}",
                amount
            )));
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            date: input.date.unwrap_or_else(Utc::now),
            vendor: input
                .vendor
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VENDOR.to_string()),
            category: Category::normalize(input.category.as_deref().unwrap_or("")),
            sub_category: input.sub_category.filter(|s| !s.trim().is_empty()),
            amount,
            payment_mode: input
                .payment_mode
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PAYMENT_MODE.to_string()),
            notes: input.notes.unwrap_or_default(),
        };

        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Replace an expense by id; unknown ids are a silent no-op
    pub fn update_expense(&mut self, updated: Expense) {
        if let Some(existing) = self.expenses.iter_mut().find(|e| e.id == updated.id) {
            *existing = updated;
        }
    }

    /// Delete an expense by id; unknown ids are a silent no-op
    pub fn delete_expense(&mut self, id: &str) {
        self.expenses.retain(|e| e.id != id);
    }

    /// Record an income entry, applying defaults for missing fields
    pub fn add_income(&mut self, input: NewIncomeEntry) -> Result<IncomeEntry> {
        let amount = input.amount.unwrap_or(0.0);
        if amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Income amount must not be negative: {}",
                amount
            )));
        }

        let entry = IncomeEntry {
            id: Uuid::new_v4().to_string(),
            date: input.date.unwrap_or_else(Utc::now),
            source: input
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Other".to_string()),
            amount,
        };

        self.income_entries.push(entry.clone());
        Ok(entry)
    }

    /// Replace an income entry by id; unknown ids are a silent no-op
    pub fn update_income(&mut self, updated: IncomeEntry) {
        if let Some(existing) = self.income_entries.iter_mut().find(|e| e.id == updated.id) {
            *existing = updated;
        }
    }

    /// Delete an income entry by id; unknown ids are a silent no-op
    pub fn delete_income(&mut self, id: &str) {
        self.income_entries.retain(|e| e.id != id);
    }

    /// Capture the full state for a sync push
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expenses: self.expenses.clone(),
            income_entries: self.income_entries.clone(),
            salary: self.salary,
            last_updated: Utc::now(),
        }
    }

    /// Replace all local state with a pulled snapshot
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.expenses = snapshot.expenses;
        self.income_entries = snapshot.income_entries;
        self.salary = snapshot.salary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_add_expense_applies_defaults() {
        let mut ledger = Ledger::new();
        let expense = ledger.add_expense(NewExpense::default()).unwrap();

        assert!(!expense.id.is_empty());
        assert_eq!(expense.vendor, "Unknown Vendor");
        assert_eq!(expense.amount, 0.0);
        assert_eq!(expense.payment_mode, "Cash");
        assert_eq!(expense.notes, "");
        assert_eq!(expense.category, Category::Others);

        let stored = &ledger.expenses()[0];
        assert_eq!(stored.id, expense.id);
    }

    #[test]
    fn test_add_expense_normalizes_category() {
        let mut ledger = Ledger::new();
        let expense = ledger
            .add_expense(NewExpense {
                category: Some(" bike_petrol ".to_string()),
                amount: Some(150.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(expense.category, Category::BikePetrol);
    }

    #[test]
    fn test_add_expense_rejects_negative_amount() {
        let mut ledger = Ledger::new();
        let result = ledger.add_expense(NewExpense {
            amount: Some(-1.0),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidData(_))));
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_add_expense_ids_unique() {
        let mut ledger = Ledger::new();
        let a = ledger.add_expense(NewExpense::default()).unwrap();
        let b = ledger.add_expense(NewExpense::default()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_expense_unknown_id_no_op() {
        let mut ledger = Ledger::new();
        let recorded = ledger
            .add_expense(NewExpense {
                amount: Some(10.0),
                ..Default::default()
            })
            .unwrap();

        let mut ghost = recorded.clone();
        ghost.id = "does-not-exist".to_string();
        ghost.amount = 999.0;
        ledger.update_expense(ghost);

        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses()[0].amount, 10.0);
    }

    #[test]
    fn test_update_expense_replaces_record() {
        let mut ledger = Ledger::new();
        let mut recorded = ledger
            .add_expense(NewExpense {
                amount: Some(10.0),
                ..Default::default()
            })
            .unwrap();

        recorded.amount = 25.0;
        recorded.vendor = "Bakery".to_string();
        ledger.update_expense(recorded.clone());

        assert_eq!(ledger.expenses()[0].amount, 25.0);
        assert_eq!(ledger.expenses()[0].vendor, "Bakery");
    }

    #[test]
    fn test_delete_expense_unknown_id_no_op() {
        let mut ledger = Ledger::new();
        ledger.add_expense(NewExpense::default()).unwrap();
        ledger.delete_expense("missing");
        assert_eq!(ledger.expenses().len(), 1);
    }

    #[test]
    fn test_expenses_by_date_desc() {
        let mut ledger = Ledger::new();
        for day in [5, 20, 10] {
            ledger
                .add_expense(NewExpense {
                    date: Some(Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap()),
                    ..Default::default()
                })
                .unwrap();
        }

        let sorted = ledger.expenses_by_date_desc();
        let days: Vec<u32> = sorted.iter().map(|e| chrono::Datelike::day(&e.date)).collect();
        assert_eq!(days, vec![20, 10, 5]);
    }

    #[test]
    fn test_income_crud() {
        let mut ledger = Ledger::new();
        let entry = ledger
            .add_income(NewIncomeEntry {
                source: Some("Freelance".to_string()),
                amount: Some(3000.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ledger.income_entries().len(), 1);

        ledger.delete_income(&entry.id);
        assert!(ledger.income_entries().is_empty());

        // Deleting again stays silent
        ledger.delete_income(&entry.id);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut ledger = Ledger::new();
        ledger.set_salary(30000.0);
        ledger
            .add_expense(NewExpense {
                amount: Some(42.0),
                category: Some("FOOD".to_string()),
                ..Default::default()
            })
            .unwrap();

        let snapshot = ledger.snapshot();

        let mut other = Ledger::new();
        other.restore(snapshot);
        assert_eq!(other.salary(), 30000.0);
        assert_eq!(other.expenses().len(), 1);
        assert_eq!(other.expenses()[0].amount, 42.0);
    }

    #[test]
    fn test_persist_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let vault = FileVault::open(tmp.path()).unwrap();

        let mut ledger = Ledger::new();
        ledger.set_salary(25000.0);
        ledger
            .add_expense(NewExpense {
                vendor: Some("Grocer".to_string()),
                category: Some("FOOD".to_string()),
                amount: Some(320.0),
                ..Default::default()
            })
            .unwrap();
        ledger.persist(&vault).unwrap();

        let loaded = Ledger::load(&vault).unwrap();
        assert_eq!(loaded.salary(), 25000.0);
        assert_eq!(loaded.expenses().len(), 1);
        assert_eq!(loaded.expenses()[0].vendor, "Grocer");
        assert_eq!(loaded.expenses()[0].category, Category::Food);
    }

    #[test]
    fn test_load_empty_vault_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let vault = FileVault::open(tmp.path()).unwrap();

        let ledger = Ledger::load(&vault).unwrap();
        assert!(ledger.expenses().is_empty());
        assert!(ledger.income_entries().is_empty());
        assert_eq!(ledger.salary(), DEFAULT_SALARY);
    }
}

//! Monthly aggregation over recorded expenses and income
//!
//! Pure functions: stored data is assumed valid, nothing here re-validates
//! or mutates.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Expense, IncomeEntry};

/// Total spent in one category during a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Per-month spending breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total: f64,
    /// Categories with at least one expense, sorted by amount descending.
    /// Categories without expenses are absent, not zero.
    pub categories: Vec<CategoryTotal>,
}

/// Income vs spending for the dashboard header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Share of income spent, clamped to [0, 100]
    pub spending_percentage: f64,
}

/// Summarize expenses for one calendar month
///
/// Category subtotals keep first-seen order among equal amounts (stable
/// descending sort).
pub fn month_summary(expenses: &[Expense], year: i32, month: u32) -> MonthSummary {
    let mut total = 0.0;
    let mut categories: Vec<CategoryTotal> = Vec::new();

    for expense in expenses {
        if expense.date.year() != year || expense.date.month() != month {
            continue;
        }
        total += expense.amount;
        match categories
            .iter_mut()
            .find(|c| c.category == expense.category)
        {
            Some(entry) => entry.amount += expense.amount,
            None => categories.push(CategoryTotal {
                category: expense.category,
                amount: expense.amount,
            }),
        }
    }

    categories.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));

    MonthSummary {
        year,
        month,
        total,
        categories,
    }
}

/// Compute the income/balance overview for a month's spending
///
/// Total income is salary plus all income entries. The spending percentage
/// is 0 when income is zero or negative so the result is never NaN or
/// infinite, and it is clamped to [0, 100] otherwise.
pub fn overview(salary: f64, income_entries: &[IncomeEntry], total_expense: f64) -> Overview {
    let total_income = salary + income_entries.iter().map(|e| e.amount).sum::<f64>();
    let balance = total_income - total_expense;

    let spending_percentage = if total_income <= 0.0 {
        0.0
    } else {
        (total_expense / total_income * 100.0).clamp(0.0, 100.0)
    };

    Overview {
        total_income,
        total_expense,
        balance,
        spending_percentage,
    }
}

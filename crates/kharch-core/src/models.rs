//! Data models for expenses, income, and sync payloads
//!
//! Wire structs use camelCase field names so snapshots stay compatible with
//! vaults written by older clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed expense categories
///
/// The canonical form is the upper-case spaced string ("HOUSE EXPENSE").
/// Anything that does not match a known category normalizes to `Others`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "HOUSE EXPENSE")]
    HouseExpense,
    #[serde(rename = "BIKE EXPENSE")]
    BikeExpense,
    #[serde(rename = "BIKE PETROL")]
    BikePetrol,
    #[serde(rename = "FOOD")]
    Food,
    #[serde(rename = "SNACK")]
    Snack,
    #[serde(rename = "PHONE DUE")]
    PhoneDue,
    #[serde(rename = "OFFERING")]
    Offering,
    #[serde(rename = "TRAVEL")]
    Travel,
    #[serde(rename = "SHOPPING")]
    Shopping,
    #[serde(rename = "MEDICAL")]
    Medical,
    #[serde(rename = "ENTERTAINMENT")]
    Entertainment,
    #[serde(rename = "PERSONAL EXPENSE")]
    PersonalExpense,
    #[serde(rename = "OTHERS")]
    Others,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 13] = [
        Category::HouseExpense,
        Category::BikeExpense,
        Category::BikePetrol,
        Category::Food,
        Category::Snack,
        Category::PhoneDue,
        Category::Offering,
        Category::Travel,
        Category::Shopping,
        Category::Medical,
        Category::Entertainment,
        Category::PersonalExpense,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HouseExpense => "HOUSE EXPENSE",
            Category::BikeExpense => "BIKE EXPENSE",
            Category::BikePetrol => "BIKE PETROL",
            Category::Food => "FOOD",
            Category::Snack => "SNACK",
            Category::PhoneDue => "PHONE DUE",
            Category::Offering => "OFFERING",
            Category::Travel => "TRAVEL",
            Category::Shopping => "SHOPPING",
            Category::Medical => "MEDICAL",
            Category::Entertainment => "ENTERTAINMENT",
            Category::PersonalExpense => "PERSONAL EXPENSE",
            Category::Others => "OTHERS",
        }
    }

    /// Normalize a free-form label into a category
    ///
    /// Case-insensitive, ignores surrounding whitespace, and treats
    /// underscores as spaces. Unknown labels map to `Others`. Total: never
    /// fails, never panics.
    pub fn normalize(raw: &str) -> Category {
        let candidate = raw.trim().to_uppercase().replace('_', " ");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == candidate)
            .unwrap_or(Category::Others)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: DateTime<Utc>,
    pub vendor: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    pub amount: f64,
    pub payment_mode: String,
    #[serde(default)]
    pub notes: String,
}

/// Input for creating an expense
///
/// Every field is optional; missing values fall back to documented defaults
/// when the entry is recorded. The category is a raw label and gets
/// normalized.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub date: Option<DateTime<Utc>>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub amount: Option<f64>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
}

/// A recorded income entry (other than salary)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub source: String,
    pub amount: f64,
}

/// Input for creating an income entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncomeEntry {
    pub date: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub amount: Option<f64>,
}

/// Full application state as pushed to / pulled from the remote vault
///
/// Sync always replaces the whole snapshot in both directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub income_entries: Vec<IncomeEntry>,
    pub salary: f64,
    pub last_updated: DateTime<Utc>,
}

/// Sync indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Syncing,
    Error,
}

/// Fields extracted by the AI collaborator from text or a receipt image
///
/// Everything is optional at the parse boundary regardless of what the
/// response schema asked for. The date is a plain YYYY-MM-DD string as
/// returned by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedExpense {
    pub date: Option<String>,
    pub vendor: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub amount: Option<f64>,
    pub payment_mode: Option<String>,
    pub notes: Option<String>,
}

/// AI savings analysis over recent spending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsInsight {
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub avoidable_expenses: String,
    #[serde(default)]
    pub estimated_savings: f64,
}

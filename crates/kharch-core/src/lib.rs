//! Kharch Core Library
//!
//! Shared functionality for the Kharch expense tracker:
//! - Expense and income models with a fixed category set
//! - Monthly aggregation (category totals, balance, spending percentage)
//! - In-memory ledger with file-backed persistence
//! - Remote vault sync over a generic JSON blob store
//! - Pluggable AI backends for expense extraction and savings insights
//! - CSV export

pub mod ai;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod stats;
pub mod storage;
pub mod sync;

pub use ai::{AiClient, ExpenseAi, ExtractInput, GeminiBackend, MockBackend};
pub use error::{Error, Result};
pub use export::{export_csv, export_filename, CsvExportOptions};
pub use ledger::Ledger;
pub use models::{
    Category, Expense, ExtractedExpense, IncomeEntry, NewExpense, NewIncomeEntry, SavingsInsight,
    Snapshot, SyncStatus,
};
pub use stats::{month_summary, overview, CategoryTotal, MonthSummary, Overview};
pub use storage::FileVault;
pub use sync::{vault_key, SyncClient, Syncer};

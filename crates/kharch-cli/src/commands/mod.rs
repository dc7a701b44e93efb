//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `assist` - AI entry and savings insights commands
//! - `core` - Shared utilities (open_vault, date parsing, formatting)
//! - `expenses` - Expense commands (add, list, delete)
//! - `export` - CSV export command
//! - `income` - Income and salary commands
//! - `reports` - Monthly summary command
//! - `serve` - Web server command
//! - `sync` - Remote vault sync commands

pub mod assist;
pub mod core;
pub mod expenses;
pub mod export;
pub mod income;
pub mod reports;
pub mod serve;
pub mod sync;

// Re-export command functions for main.rs
pub use assist::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use income::*;
pub use reports::*;
pub use serve::*;
pub use sync::*;

/// Truncate a string for table display
///
/// Vendor and source names are arbitrary UTF-8, so the cut backs up to the
/// nearest char boundary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max.saturating_sub(3);
        while cut > 0 && !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &s[..cut])
    }
}

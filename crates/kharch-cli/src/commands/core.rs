//! Shared command utilities

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use kharch_core::{FileVault, Ledger};

/// Open the vault at the given directory, or the default data directory
pub fn open_vault(data_dir: Option<&Path>) -> Result<FileVault> {
    match data_dir {
        Some(dir) => FileVault::open(dir).context("Failed to open data directory"),
        None => FileVault::open_default().context("Failed to open default data directory"),
    }
}

/// Load the ledger from the vault
pub fn load_ledger(vault: &FileVault) -> Result<Ledger> {
    Ledger::load(vault).context("Failed to load ledger")
}

/// Parse a YYYY-MM-DD argument into a UTC midnight timestamp
pub fn parse_date_arg(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", raw))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .context("Invalid date")?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Parse a YYYY-MM-DD argument into a calendar date
pub fn parse_naive_date_arg(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", raw))
}

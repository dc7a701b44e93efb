//! CSV export command implementation

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kharch_core::{export_csv, export_filename, CsvExportOptions};

use super::{load_ledger, open_vault, parse_naive_date_arg};

pub fn cmd_export(
    data_dir: Option<&Path>,
    from: &str,
    to: &str,
    notes: bool,
    output: Option<&Path>,
) -> Result<()> {
    let from = parse_naive_date_arg(from)?;
    let to = parse_naive_date_arg(to)?;
    anyhow::ensure!(from <= to, "From date must not be after to date");

    let vault = open_vault(data_dir)?;
    let ledger = load_ledger(&vault)?;

    let opts = CsvExportOptions {
        from,
        to,
        include_notes: notes,
    };
    let Some(csv) = export_csv(ledger.expenses(), &opts) else {
        println!("No expenses between {} and {} (nothing to export).", from, to);
        return Ok(());
    };

    let path: PathBuf = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export_filename(from, to)),
    };
    std::fs::write(&path, &csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    // Subtract the header line from the row count
    let rows = csv.lines().count().saturating_sub(1);
    println!("✅ Exported {} expenses to {}", rows, path.display());

    Ok(())
}

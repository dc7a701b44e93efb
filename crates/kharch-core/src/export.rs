//! CSV export of expenses over an inclusive date range

use chrono::{Datelike, NaiveDate};

use crate::models::Expense;

/// Options for expense export
#[derive(Debug, Clone, Copy)]
pub struct CsvExportOptions {
    /// Start date (inclusive)
    pub from: NaiveDate,
    /// End date (inclusive)
    pub to: NaiveDate,
    /// Append a Notes column
    pub include_notes: bool,
}

/// Render the matching expenses as CSV
///
/// One header row, then one row per expense sorted by date ascending.
/// Returns None when no expense falls inside the range so callers can
/// report it instead of producing an empty file.
pub fn export_csv(expenses: &[Expense], opts: &CsvExportOptions) -> Option<String> {
    let mut matching: Vec<&Expense> = expenses
        .iter()
        .filter(|e| {
            let date = e.date.date_naive();
            date >= opts.from && date <= opts.to
        })
        .collect();

    if matching.is_empty() {
        return None;
    }

    matching.sort_by_key(|e| e.date);

    let mut csv = String::from("Date,Day,Vendor,Category,Sub-Category,Amount (INR),Payment Mode");
    if opts.include_notes {
        csv.push_str(",Notes");
    }
    csv.push('\n');

    for expense in matching {
        let date = expense.date.date_naive();
        csv.push_str(&format!(
            "{},{},{},{},{},{:.2},{}",
            date,
            date.format("%a"),
            escape_csv_field(&expense.vendor),
            escape_csv_field(expense.category.as_str()),
            escape_csv_field(expense.sub_category.as_deref().unwrap_or("")),
            expense.amount,
            escape_csv_field(&expense.payment_mode),
        ));
        if opts.include_notes {
            csv.push(',');
            csv.push_str(&escape_csv_field(&expense.notes));
        }
        csv.push('\n');
    }

    Some(csv)
}

/// Suggested filename for an export, embedding the range bounds
pub fn export_filename(from: NaiveDate, to: NaiveDate) -> String {
    format!("expenses_{}_to_{}.csv", from, to)
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

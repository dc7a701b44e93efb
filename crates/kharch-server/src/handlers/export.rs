//! CSV export handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::Response,
};
use chrono::NaiveDate;
use serde::Deserialize;

use kharch_core::{export_csv, export_filename, CsvExportOptions};

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct ExportQuery {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub notes: bool,
}

/// GET /api/export?from=&to=&notes= - Download expenses as CSV
///
/// Dates are inclusive `YYYY-MM-DD` bounds. An empty range is a 404 rather
/// than an empty file.
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let from = parse_date(&query.from)?;
    let to = parse_date(&query.to)?;
    if from > to {
        return Err(AppError::bad_request("From date must not be after to date"));
    }

    let opts = CsvExportOptions {
        from,
        to,
        include_notes: query.notes,
    };

    let ledger = state.ledger.read().await;
    let csv = export_csv(ledger.expenses(), &opts)
        .ok_or_else(|| AppError::not_found("No expenses in the selected range"))?;

    let disposition = format!("attachment; filename=\"{}\"", export_filename(from, to));
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(csv.into())?;
    Ok(response)
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(&format!("Invalid date: {}", raw)))
}

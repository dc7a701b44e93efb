//! Monthly summary handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use kharch_core::{month_summary, overview, MonthSummary, Overview};

use crate::{AppError, AppState};

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: MonthSummary,
    pub overview: Overview,
}

/// GET /api/summary?year=&month= - Monthly totals and the income overview
///
/// Defaults to the current calendar month.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("Month must be between 1 and 12"));
    }

    let ledger = state.ledger.read().await;
    let summary = month_summary(ledger.expenses(), year, month);
    let overview = overview(ledger.salary(), ledger.income_entries(), summary.total);

    Ok(Json(SummaryResponse { summary, overview }))
}

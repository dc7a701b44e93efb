//! AI assistance handlers
//!
//! Extraction is blocking: if the backend cannot produce a usable amount,
//! the request fails with a 400 and nothing is recorded.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;

use kharch_core::ai::{ExpenseAi, ExtractInput};
use kharch_core::{Expense, ExtractedExpense, NewExpense, SavingsInsight};

use crate::{map_core_error, AppError, AppState};

#[derive(Deserialize)]
pub struct ChatBody {
    pub text: String,
}

/// POST /api/assist/chat - Record an expense described in free text
pub async fn assist_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> Result<Json<Expense>, AppError> {
    if body.text.trim().is_empty() {
        return Err(AppError::bad_request("Text cannot be empty"));
    }

    let input = ExtractInput::Text(body.text);
    record_extracted(&state, &input).await
}

/// POST /api/assist/receipt - Record an expense from a receipt image
///
/// Multipart fields: `image` (required), `context` (optional free text).
pub async fn assist_receipt(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Expense>, AppError> {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut context: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(&format!("Failed to read image: {}", e)))?;
                image = Some((data.to_vec(), mime_type));
            }
            Some("context") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(&format!("Failed to read context: {}", e)))?;
                if !text.trim().is_empty() {
                    context = Some(text);
                }
            }
            _ => {}
        }
    }

    let (data, mime_type) = image.ok_or_else(|| AppError::bad_request("Missing image field"))?;
    if data.is_empty() {
        return Err(AppError::bad_request("Image is empty"));
    }

    let input = ExtractInput::Image {
        data,
        mime_type,
        context,
    };
    record_extracted(&state, &input).await
}

/// GET /api/insights - Savings suggestions over recent spending
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SavingsInsight>, AppError> {
    let ai = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::unavailable("AI backend is not configured"))?;

    let expenses = {
        let ledger = state.ledger.read().await;
        ledger.expenses().to_vec()
    };
    if expenses.is_empty() {
        return Err(AppError::bad_request("No expenses to analyze"));
    }

    let insight = ai
        .savings_insights(&expenses)
        .await
        .map_err(map_core_error)?;
    Ok(Json(insight))
}

/// Run extraction and record the result as an expense
async fn record_extracted(
    state: &Arc<AppState>,
    input: &ExtractInput,
) -> Result<Json<Expense>, AppError> {
    let ai = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::unavailable("AI backend is not configured"))?;

    let extracted = ai.extract_expense(input).await.map_err(|e| {
        warn!(error = %e, "Expense extraction failed");
        AppError::bad_request("Could not understand the expense, please try rephrasing")
    })?;

    match extracted.amount {
        Some(amount) if amount > 0.0 => {}
        _ => {
            return Err(AppError::bad_request(
                "Could not determine the expense amount, please include it explicitly",
            ));
        }
    }

    let expense = {
        let mut ledger = state.ledger.write().await;
        ledger
            .add_expense(to_new_expense(extracted))
            .map_err(map_core_error)?
    };
    state.commit().await?;
    Ok(Json(expense))
}

/// Convert an extraction result into ledger input
///
/// The model reports dates as `YYYY-MM-DD`; an unparseable date is dropped
/// so the ledger falls back to now.
fn to_new_expense(extracted: ExtractedExpense) -> NewExpense {
    let date = extracted
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt));

    NewExpense {
        date,
        vendor: extracted.vendor,
        category: extracted.category,
        sub_category: extracted.sub_category,
        amount: extracted.amount,
        payment_mode: extracted.payment_mode,
        notes: extracted.notes,
    }
}

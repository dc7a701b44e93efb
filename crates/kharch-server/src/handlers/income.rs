//! Income and salary handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use kharch_core::{IncomeEntry, NewIncomeEntry};

use crate::{map_core_error, AppError, AppState, SuccessResponse};

#[derive(Serialize, Deserialize)]
pub struct SalaryBody {
    pub salary: f64,
}

/// GET /api/income - List additional income entries
pub async fn list_income(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IncomeEntry>>, AppError> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.income_entries().to_vec()))
}

/// POST /api/income - Record an income entry
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewIncomeEntry>,
) -> Result<Json<IncomeEntry>, AppError> {
    let entry = {
        let mut ledger = state.ledger.write().await;
        ledger.add_income(input).map_err(map_core_error)?
    };
    state.commit().await?;
    Ok(Json(entry))
}

/// PUT /api/income/:id - Replace an income entry
///
/// The path id wins over any id in the body. An unknown id is ignored.
pub async fn update_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut entry): Json<IncomeEntry>,
) -> Result<Json<SuccessResponse>, AppError> {
    entry.id = id;
    {
        let mut ledger = state.ledger.write().await;
        ledger.update_income(entry);
    }
    state.commit().await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/income/:id - Delete an income entry
pub async fn delete_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    {
        let mut ledger = state.ledger.write().await;
        ledger.delete_income(&id);
    }
    state.commit().await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/salary - Get the monthly salary
pub async fn get_salary(State(state): State<Arc<AppState>>) -> Result<Json<SalaryBody>, AppError> {
    let ledger = state.ledger.read().await;
    Ok(Json(SalaryBody {
        salary: ledger.salary(),
    }))
}

/// PUT /api/salary - Set the monthly salary
pub async fn set_salary(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SalaryBody>,
) -> Result<Json<SuccessResponse>, AppError> {
    if body.salary < 0.0 {
        return Err(AppError::bad_request("Salary cannot be negative"));
    }
    {
        let mut ledger = state.ledger.write().await;
        ledger.set_salary(body.salary);
    }
    state.commit().await?;
    Ok(Json(SuccessResponse { success: true }))
}

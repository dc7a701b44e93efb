//! Expense CRUD handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use kharch_core::{Expense, NewExpense};

use crate::{map_core_error, AppError, AppState, SuccessResponse};

/// GET /api/expenses - List all expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.expenses_by_date_desc()))
}

/// POST /api/expenses - Record a new expense
///
/// Missing fields receive defaults; a negative amount is rejected.
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = {
        let mut ledger = state.ledger.write().await;
        ledger.add_expense(input).map_err(map_core_error)?
    };
    state.commit().await?;
    Ok(Json(expense))
}

/// PUT /api/expenses/:id - Replace an expense
///
/// The path id wins over any id in the body. An unknown id is ignored.
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut expense): Json<Expense>,
) -> Result<Json<SuccessResponse>, AppError> {
    expense.id = id;
    {
        let mut ledger = state.ledger.write().await;
        ledger.update_expense(expense);
    }
    state.commit().await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/expenses/:id - Delete an expense
///
/// An unknown id is ignored.
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    {
        let mut ledger = state.ledger.write().await;
        ledger.delete_expense(&id);
    }
    state.commit().await?;
    Ok(Json(SuccessResponse { success: true }))
}

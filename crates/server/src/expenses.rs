//! Expense API endpoints

use api_types::{
    common::ActionResponse,
    expense::{ExpenseNew, ExpenseUpdate},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, action_outcome, server::ServerState};
use engine::ExpenseDraft;

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Json<ActionResponse> {
    let draft = ExpenseDraft {
        description: payload.description,
        amount: payload.amount,
        date: payload.date,
        category: payload.category,
        is_public: payload.is_public,
    };

    let mut engine = state.engine.write().await;
    action_outcome(
        engine.add_expense(payload.vehicle_id, draft).map(|_| ()),
        "Expense added",
    )
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseUpdate>,
) -> Json<ActionResponse> {
    let draft = ExpenseDraft {
        description: payload.description,
        amount: payload.amount,
        date: payload.date,
        category: payload.category,
        is_public: payload.is_public,
    };

    let mut engine = state.engine.write().await;
    action_outcome(
        engine.update_expense(payload.id, payload.vehicle_id, draft),
        "Expense updated",
    )
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_expense(id)?;

    Ok(StatusCode::NO_CONTENT)
}

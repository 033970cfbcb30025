//! Vehicle API endpoints

use api_types::{
    common::ActionResponse,
    expense::ExpenseView,
    vehicle::{
        MarginUpdate, SellRequest, VehicleCreated, VehicleListResponse, VehicleNew, VehicleView,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, action_outcome, server::ServerState};
use engine::{Engine, Vehicle, VehicleDraft, summary};

fn view(engine: &Engine, vehicle: &Vehicle) -> Result<VehicleView, engine::EngineError> {
    let expenses = engine.expenses_for(vehicle.id)?;
    let summary = summary::aggregate(vehicle, expenses.iter().copied());

    Ok(VehicleView {
        id: vehicle.id,
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        year: vehicle.year,
        reg_number: vehicle.reg_number.clone(),
        vin: vehicle.vin.clone(),
        status: vehicle.status.as_str().to_string(),
        purchase_price_cents: vehicle.purchase_price.cents(),
        purchase_date: vehicle.purchase_date,
        sold_price_cents: vehicle.sold_price.map(|price| price.cents()),
        sold_date: vehicle.sold_date,
        profit_margin: vehicle.profit_margin(),
        images: vehicle.images.clone(),
        created_at: vehicle.created_at,
        expenses: expenses
            .into_iter()
            .map(|expense| ExpenseView {
                id: expense.id,
                vehicle_id: expense.vehicle_id,
                description: expense.description.clone(),
                amount_cents: expense.amount.cents(),
                date: expense.date,
                category: expense.category.as_str().to_string(),
                is_public: expense.is_public,
            })
            .collect(),
        total_expenses_cents: summary.total_expenses.cents(),
        total_cost_cents: summary.total_cost.cents(),
        profit_loss_cents: summary.profit_loss.map(|amount| amount.cents()),
    })
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<VehicleListResponse>, ServerError> {
    let engine = state.engine.read().await;

    let mut vehicles = Vec::new();
    for vehicle in engine.vehicles_by_created_desc() {
        vehicles.push(view(&engine, vehicle)?);
    }

    Ok(Json(VehicleListResponse { vehicles }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VehicleNew>,
) -> Result<(StatusCode, Json<VehicleCreated>), ServerError> {
    let draft = VehicleDraft {
        make: payload.make,
        model: payload.model,
        year: payload.year,
        reg_number: payload.reg_number,
        vin: payload.vin,
        purchase_price: payload.purchase_price,
        purchase_date: payload.purchase_date,
        images: payload.images,
    };

    let mut engine = state.engine.write().await;
    let id = engine.add_vehicle(draft)?;

    Ok((StatusCode::CREATED, Json(VehicleCreated { id })))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_vehicle(id)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_margin(
    State(state): State<ServerState>,
    Json(payload): Json<MarginUpdate>,
) -> Json<ActionResponse> {
    let mut engine = state.engine.write().await;
    action_outcome(
        engine.set_margin(payload.id, payload.profit_margin),
        "Profit margin updated",
    )
}

pub async fn sell(
    State(state): State<ServerState>,
    Json(payload): Json<SellRequest>,
) -> Json<ActionResponse> {
    let mut engine = state.engine.write().await;
    action_outcome(
        engine.mark_sold(payload.id, &payload.sold_price, &payload.sold_date),
        "Vehicle marked as sold",
    )
}

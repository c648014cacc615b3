//! HTTP handlers for order placement and lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared::models::{
    AssignEmployeeRequest, OrderSummary, PlaceOrderRequest, UpdateStatusRequest,
};

use crate::error::AppResult;
use crate::services::OrderService;
use crate::AppState;

/// Place a new order
pub async fn place_order(
    State(state): State<AppState>,
    Json(input): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderSummary>)> {
    let service = OrderService::new(state.db);
    let summary = service.place_order(input).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Get an order summary
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
) -> AppResult<Json<OrderSummary>> {
    let service = OrderService::new(state.db);
    let summary = service.get_summary(order_id).await?;
    Ok(Json(summary))
}

/// Move an order to another status
pub async fn update_status(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderSummary>> {
    let service = OrderService::new(state.db);
    let summary = service.update_status(order_id, input).await?;
    Ok(Json(summary))
}

/// Reassign the responsible employee of an order
pub async fn assign_employee(
    State(state): State<AppState>,
    Path(order_id): Path<i64>,
    Json(input): Json<AssignEmployeeRequest>,
) -> AppResult<Json<OrderSummary>> {
    let service = OrderService::new(state.db);
    let summary = service.assign_employee(order_id, input).await?;
    Ok(Json(summary))
}

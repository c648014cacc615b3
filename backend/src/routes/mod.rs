//! Route definitions for the Warehouse Management Platform

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Order placement and lifecycle
        .nest("/orders", order_routes())
        // Stock ledger administration
        .nest("/stock", stock_routes())
}

/// Order management routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::place_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/status", put(handlers::update_status))
        .route("/:order_id/employee", put(handlers::assign_employee))
}

/// Stock ledger routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_stock_entry))
        .route("/levels/:product_id/:warehouse_id", get(handlers::get_stock_entry))
        .route("/entries/:entry_id/quantity", put(handlers::set_stock_quantity))
}

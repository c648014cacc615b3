//! HTTP handlers for stock ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use shared::models::{CreateStockEntryRequest, SetStockQuantityRequest, StockEntryView};

use crate::error::{AppError, AppResult};
use crate::services::StockService;
use crate::AppState;

/// Create a stock entry for a (product, warehouse) pair
pub async fn create_stock_entry(
    State(state): State<AppState>,
    Json(input): Json<CreateStockEntryRequest>,
) -> AppResult<(StatusCode, Json<StockEntryView>)> {
    let service = StockService::new(state.db);
    let entry = service
        .create(input.product_id, input.warehouse_id, input.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into_view())))
}

/// Get the active stock entry for a (product, warehouse) pair
pub async fn get_stock_entry(
    State(state): State<AppState>,
    Path((product_id, warehouse_id)): Path<(i64, i64)>,
) -> AppResult<Json<StockEntryView>> {
    let service = StockService::new(state.db);
    let entry = service
        .get_active_entry(product_id, warehouse_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFoundOrArchived(format!(
                "Stock entry for product {} at warehouse {}",
                product_id, warehouse_id
            ))
        })?;
    Ok(Json(entry.into_view()))
}

/// Administrative direct set of a stock quantity
pub async fn set_stock_quantity(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
    Json(input): Json<SetStockQuantityRequest>,
) -> AppResult<Json<StockEntryView>> {
    let service = StockService::new(state.db);
    let entry = service
        .set_quantity(input.user_id, entry_id, input.quantity)
        .await?;
    Ok(Json(entry.into_view()))
}

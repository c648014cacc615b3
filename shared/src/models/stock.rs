//! Stock ledger models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stock ledger entry as exposed to the admin clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntryView {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a stock entry for a (product, warehouse) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockEntryRequest {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
    pub user_id: Option<i64>,
}

/// Request for an administrative direct set of a stock quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStockQuantityRequest {
    pub quantity: i32,
    pub user_id: Option<i64>,
}

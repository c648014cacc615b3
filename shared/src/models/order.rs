//! Order placement and lifecycle models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One requested product/quantity/price entry within an order request.
///
/// `order_price` is the unit price the caller saw in the catalog; the
/// workflow rejects the whole order if it no longer matches the live price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub product_id: i64,
    pub quantity: i32,
    pub order_price: Decimal,
}

/// Request to place a new order against one warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub warehouse_id: i64,
    pub user_id: i64,
    pub lines: Vec<OrderLineRequest>,
}

/// Request to move an order to another status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status_id: i64,
    pub user_id: Option<i64>,
}

/// Request to reassign the responsible employee of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignEmployeeRequest {
    pub employee_id: i64,
    pub user_id: Option<i64>,
}

/// Denormalized order summary returned by every mutating order operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub total_price: Decimal,
    pub creation_timestamp: DateTime<Utc>,
    pub warehouse_label: String,
    /// "unassigned" when no responsible employee could be resolved
    pub employee_label: String,
    pub user_label: String,
    pub status_label: String,
}

/// Statuses the workflow itself depends on, identified by stable tag rather
/// than display name so renaming or localizing a status cannot break order
/// placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    /// Initial status assigned to every new order
    Active,
    /// Exclusion marker used by archive guards
    Cancelled,
}

impl CanonicalStatus {
    pub fn tag(&self) -> &'static str {
        match self {
            CanonicalStatus::Active => "active",
            CanonicalStatus::Cancelled => "cancelled",
        }
    }
}

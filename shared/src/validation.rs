//! Order arithmetic and request validation helpers
//!
//! Kept in the shared crate so the admin clients can compute the same totals
//! the backend persists.

use rust_decimal::Decimal;

use crate::models::OrderLineRequest;

/// Total for one order line: quantity × unit price
pub fn line_total(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Total price of an order: sum of its line totals
pub fn order_total(lines: &[OrderLineRequest]) -> Decimal {
    lines
        .iter()
        .map(|line| line_total(line.quantity, line.order_price))
        .sum()
}

/// Product ids that appear more than once in the requested lines.
///
/// An order carries at most one line per product; duplicates are rejected
/// before any catalog lookup.
pub fn duplicate_product_ids(lines: &[OrderLineRequest]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for line in lines {
        if !seen.insert(line.product_id) && !duplicates.contains(&line.product_id) {
            duplicates.push(line.product_id);
        }
    }
    duplicates
}

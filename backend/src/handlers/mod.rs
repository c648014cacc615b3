//! HTTP handlers for the Warehouse Management Platform

pub mod health;
pub mod orders;
pub mod stock;

pub use health::*;
pub use orders::*;
pub use stock::*;

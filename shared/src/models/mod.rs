//! Wire models for the warehouse administration API

pub mod order;
pub mod stock;

pub use order::*;
pub use stock::*;

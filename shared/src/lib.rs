//! Shared types and models for the Warehouse Management Platform
//!
//! This crate contains request/response types and workflow arithmetic shared
//! between the backend, the web admin UI, and the desktop client.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;

//! Business logic services for the Warehouse Management Platform

pub mod assignment;
pub mod audit;
pub mod catalog;
pub mod metrics;
pub mod order;
pub mod stock;

pub use assignment::AssignmentService;
pub use audit::AuditService;
pub use catalog::CatalogService;
pub use metrics::MetricsService;
pub use order::OrderService;
pub use stock::StockService;

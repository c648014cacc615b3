//! Order workflow engine: turns a basket of requested product quantities
//! into a committed order
//!
//! Placement runs in two phases. The pre-check validates the request against
//! the catalog and the stock ledger outside any transaction, so callers get
//! an itemized error without paying for a transaction. The commit phase
//! re-derives current stock inside one atomic unit; its conditional
//! decrements are the true enforcement point, so a race lost between
//! pre-check and commit aborts the whole unit instead of overselling.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use rust_decimal::Decimal;
use shared::models::{
    AssignEmployeeRequest, CanonicalStatus, OrderSummary, PlaceOrderRequest, UpdateStatusRequest,
};
use shared::validation::{duplicate_product_ids, line_total, order_total};

use crate::db::UnitOfWork;
use crate::error::{AppError, AppResult};
use crate::services::metrics::ORDERS_CREATED;
use crate::services::{
    AssignmentService, AuditService, CatalogService, MetricsService, StockService,
};

/// Order workflow service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Order header row
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: i64,
    pub warehouse_id: i64,
    pub employee_id: Option<i64>,
    pub user_id: i64,
    pub status_id: i64,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row for the denormalized summary query
#[derive(Debug, FromRow)]
struct SummaryRow {
    id: i64,
    total_price: Decimal,
    created_at: DateTime<Utc>,
    warehouse_name: String,
    employee_name: Option<String>,
    user_name: String,
    status_name: String,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Place a new order: validate, commit atomically, return the summary.
    ///
    /// Side effects (audit entry, orders-created counter) are dispatched
    /// after the commit and can never fail a committed order.
    pub async fn place_order(&self, input: PlaceOrderRequest) -> AppResult<OrderSummary> {
        let catalog = CatalogService::new(self.db.clone());
        let stock = StockService::new(self.db.clone());

        // Pre-check: fail fast, no transaction held
        if input.lines.is_empty() {
            return Err(AppError::InvalidInput(
                "order must contain at least one line".to_string(),
            ));
        }

        catalog.get_active_warehouse(input.warehouse_id).await?;
        catalog.get_active_user(input.user_id).await?;
        let initial_status = catalog.get_status_by_tag(CanonicalStatus::Active).await?;

        let duplicates = duplicate_product_ids(&input.lines);
        if !duplicates.is_empty() {
            let ids: Vec<String> = duplicates.iter().map(|id| id.to_string()).collect();
            return Err(AppError::InvalidInput(format!(
                "duplicate product id(s) in order lines: {}",
                ids.join(", ")
            )));
        }

        let product_ids: Vec<i64> = input.lines.iter().map(|line| line.product_id).collect();
        let products = catalog.get_active_products(&product_ids).await?;

        for (idx, line) in input.lines.iter().enumerate() {
            if line.quantity <= 0 {
                return Err(AppError::Validation {
                    field: format!("lines[{}].quantity", idx),
                    message: format!("Quantity must be positive, got {}", line.quantity),
                });
            }

            let product = &products[&line.product_id];
            if line.order_price != product.price {
                return Err(AppError::PriceMismatch {
                    product_id: line.product_id,
                    expected: product.price,
                    submitted: line.order_price,
                });
            }

            // Advisory only; the commit phase re-checks under the transaction
            let available = stock
                .get_active_entry(line.product_id, input.warehouse_id)
                .await?
                .map(|entry| entry.quantity)
                .unwrap_or(0);
            if available < line.quantity {
                return Err(AppError::InsufficientStock {
                    product_id: line.product_id,
                    available,
                    requested: line.quantity,
                });
            }
        }

        let total_price = order_total(&input.lines);

        // Commit phase: one atomic unit
        let mut uow = UnitOfWork::begin(&self.db).await?;

        let assignment = AssignmentService::new(self.db.clone());
        let employee_id = assignment
            .find_default(uow.conn(), input.warehouse_id)
            .await?;

        let order_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO orders (warehouse_id, employee_id, user_id, status_id, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(input.warehouse_id)
        .bind(employee_id)
        .bind(input.user_id)
        .bind(initial_status.id)
        .bind(total_price)
        .fetch_one(uow.conn())
        .await?;

        for line in &input.lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (order_id, product_id, quantity, unit_price, line_total)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.order_price)
            .bind(line_total(line.quantity, line.order_price))
            .execute(uow.conn())
            .await?;

            // Re-read the entry under the transaction and decrement with the
            // ledger's conditional guard. Losing the race since the pre-check
            // aborts the whole unit here.
            let entry = stock
                .get_active_entry_in(uow.conn(), line.product_id, input.warehouse_id)
                .await?
                .ok_or(AppError::InsufficientStock {
                    product_id: line.product_id,
                    available: 0,
                    requested: line.quantity,
                })?;
            stock.decrement(uow.conn(), entry.id, line.quantity).await?;
        }

        uow.commit().await?;

        // Best-effort side effects after the authoritative commit
        AuditService::new(self.db.clone()).record_detached(
            Some(input.user_id),
            format!("create order (total {})", total_price),
            "orders",
            order_id,
        );
        MetricsService::new(self.db.clone()).increment_detached(ORDERS_CREATED);

        self.get_summary(order_id).await
    }

    /// Move an order to another status.
    ///
    /// Transitions are unconstrained: any active status may be set from any
    /// other; the target only has to exist and not be archived.
    pub async fn update_status(
        &self,
        order_id: i64,
        input: UpdateStatusRequest,
    ) -> AppResult<OrderSummary> {
        let order = self.get_order(order_id).await?;

        let catalog = CatalogService::new(self.db.clone());
        let new_status = catalog.get_active_status(input.status_id).await?;

        let old_tag = sqlx::query_scalar::<_, String>(
            "SELECT tag FROM order_statuses WHERE id = $1",
        )
        .bind(order.status_id)
        .fetch_optional(&self.db)
        .await?
        .unwrap_or_else(|| "unknown".to_string());

        sqlx::query("UPDATE orders SET status_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_status.id)
            .bind(order_id)
            .execute(&self.db)
            .await?;

        AuditService::new(self.db.clone()).record_detached(
            input.user_id,
            format!("status {} -> {}", old_tag, new_status.tag),
            "orders",
            order_id,
        );

        self.get_summary(order_id).await
    }

    /// Reassign the responsible employee of an order.
    pub async fn assign_employee(
        &self,
        order_id: i64,
        input: AssignEmployeeRequest,
    ) -> AppResult<OrderSummary> {
        let order = self.get_order(order_id).await?;

        let catalog = CatalogService::new(self.db.clone());
        let employee = catalog.get_active_employee(input.employee_id).await?;

        let assignment = AssignmentService::new(self.db.clone());
        if !assignment
            .is_assigned_to(employee.id, order.warehouse_id)
            .await?
        {
            // Advisory only; the assignment still goes through
            tracing::warn!(
                "Employee {} is not assigned to warehouse {}, assigning to order {} anyway",
                employee.id,
                order.warehouse_id,
                order_id
            );
        }

        sqlx::query("UPDATE orders SET employee_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(employee.id)
            .bind(order_id)
            .execute(&self.db)
            .await?;

        let old_label = order
            .employee_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unassigned".to_string());
        AuditService::new(self.db.clone()).record_detached(
            input.user_id,
            format!("employee {} -> {}", old_label, employee.id),
            "orders",
            order_id,
        );

        self.get_summary(order_id).await
    }

    /// Denormalized summary of an order
    pub async fn get_summary(&self, order_id: i64) -> AppResult<OrderSummary> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT o.id, o.total_price, o.created_at,
                   w.name AS warehouse_name, e.name AS employee_name,
                   u.name AS user_name, s.name AS status_name
            FROM orders o
            JOIN warehouses w ON w.id = o.warehouse_id
            JOIN app_users u ON u.id = o.user_id
            JOIN order_statuses s ON s.id = o.status_id
            LEFT JOIN employees e ON e.id = o.employee_id
            WHERE o.id = $1 AND o.archived = FALSE
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Order {}", order_id)))?;

        Ok(OrderSummary {
            id: row.id,
            total_price: row.total_price,
            creation_timestamp: row.created_at,
            warehouse_label: row.warehouse_name,
            employee_label: row
                .employee_name
                .unwrap_or_else(|| "unassigned".to_string()),
            user_label: row.user_name,
            status_label: row.status_name,
        })
    }

    /// Load an order that exists and is not archived
    async fn get_order(&self, order_id: i64) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, warehouse_id, employee_id, user_id, status_id, total_price,
                   created_at, updated_at
            FROM orders
            WHERE id = $1 AND archived = FALSE
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Order {}", order_id)))
    }
}

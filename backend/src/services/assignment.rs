//! Best-effort resolution of a default responsible employee for an order
//!
//! Denormalization only; never a correctness gate for order placement.

use sqlx::{PgConnection, PgPool};

use crate::error::AppResult;

#[derive(Clone)]
pub struct AssignmentService {
    db: PgPool,
}

impl AssignmentService {
    /// Create a new AssignmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// An active employee currently assigned to the warehouse, if any
    pub async fn find_for_warehouse(
        &self,
        conn: &mut PgConnection,
        warehouse_id: i64,
    ) -> AppResult<Option<i64>> {
        let employee_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT e.id
            FROM employees e
            JOIN employee_warehouses ew ON ew.employee_id = e.id
            WHERE ew.warehouse_id = $1 AND e.archived = FALSE
            ORDER BY e.id
            LIMIT 1
            "#,
        )
        .bind(warehouse_id)
        .fetch_optional(conn)
        .await?;

        Ok(employee_id)
    }

    /// Any active employee, as a fallback when the warehouse has none
    pub async fn find_any_active(&self, conn: &mut PgConnection) -> AppResult<Option<i64>> {
        let employee_id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM employees WHERE archived = FALSE ORDER BY id LIMIT 1",
        )
        .fetch_optional(conn)
        .await?;

        Ok(employee_id)
    }

    /// Default responsible employee for a new order: warehouse assignment
    /// first, then any active employee, else unassigned.
    pub async fn find_default(
        &self,
        conn: &mut PgConnection,
        warehouse_id: i64,
    ) -> AppResult<Option<i64>> {
        if let Some(employee_id) = self.find_for_warehouse(conn, warehouse_id).await? {
            return Ok(Some(employee_id));
        }
        self.find_any_active(conn).await
    }

    /// Whether an employee is associated with a warehouse. Used only for a
    /// non-blocking warning during reassignment.
    pub async fn is_assigned_to(&self, employee_id: i64, warehouse_id: i64) -> AppResult<bool> {
        let assigned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employee_warehouses WHERE employee_id = $1 AND warehouse_id = $2)"
        )
        .bind(employee_id)
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        Ok(assigned)
    }
}

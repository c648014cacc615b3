//! Read-only catalog lookups: products, warehouses, users, employees and
//! status configuration

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;

use shared::models::CanonicalStatus;

use crate::error::{AppError, AppResult};

/// Catalog reader used by the order workflow for identity, price and
/// archived-state checks
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Product identity and live price
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AppUser {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
}

/// One row of status configuration
#[derive(Debug, Clone, FromRow)]
pub struct OrderStatus {
    pub id: i64,
    pub tag: String,
    pub name: String,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Look up an active product
    pub async fn get_active_product(&self, product_id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products WHERE id = $1 AND archived = FALSE",
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Product {}", product_id)))
    }

    /// Resolve all requested products at once, naming every id that is
    /// missing or archived.
    pub async fn get_active_products(
        &self,
        product_ids: &[i64],
    ) -> AppResult<HashMap<i64, Product>> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price FROM products WHERE id = ANY($1) AND archived = FALSE",
        )
        .bind(product_ids)
        .fetch_all(&self.db)
        .await?;

        let products: HashMap<i64, Product> = rows.into_iter().map(|p| (p.id, p)).collect();

        let missing: Vec<String> = product_ids
            .iter()
            .filter(|id| !products.contains_key(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::NotFoundOrArchived(format!(
                "Product(s) {}",
                missing.join(", ")
            )));
        }

        Ok(products)
    }

    /// Look up an active warehouse
    pub async fn get_active_warehouse(&self, warehouse_id: i64) -> AppResult<Warehouse> {
        sqlx::query_as::<_, Warehouse>(
            "SELECT id, name FROM warehouses WHERE id = $1 AND archived = FALSE",
        )
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Warehouse {}", warehouse_id)))
    }

    /// Look up an active user
    pub async fn get_active_user(&self, user_id: i64) -> AppResult<AppUser> {
        sqlx::query_as::<_, AppUser>(
            "SELECT id, name FROM app_users WHERE id = $1 AND archived = FALSE",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("User {}", user_id)))
    }

    /// Look up an active employee
    pub async fn get_active_employee(&self, employee_id: i64) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, name FROM employees WHERE id = $1 AND archived = FALSE",
        )
        .bind(employee_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Employee {}", employee_id)))
    }

    /// Look up an active status row by id
    pub async fn get_active_status(&self, status_id: i64) -> AppResult<OrderStatus> {
        sqlx::query_as::<_, OrderStatus>(
            "SELECT id, tag, name FROM order_statuses WHERE id = $1 AND archived = FALSE",
        )
        .bind(status_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Status {}", status_id)))
    }

    /// Resolve a canonical status by its stable tag. The workflow cannot
    /// proceed without it, so a missing tag is a configuration error rather
    /// than a not-found.
    pub async fn get_status_by_tag(&self, status: CanonicalStatus) -> AppResult<OrderStatus> {
        sqlx::query_as::<_, OrderStatus>(
            "SELECT id, tag, name FROM order_statuses WHERE tag = $1 AND archived = FALSE",
        )
        .bind(status.tag())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "canonical order status '{}' is not configured",
                status.tag()
            ))
        })
    }
}

//! Stock ledger: the authoritative available-quantity record for each
//! (product, warehouse) pair
//!
//! The only workflow mutation is a conditional decrement executed inside the
//! caller's transaction; the `quantity >= amount` guard in the UPDATE itself
//! is what makes oversell impossible under concurrent placement.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};

use shared::models::StockEntryView;

use crate::error::{AppError, AppResult};
use crate::services::{AuditService, CatalogService};

/// Stock ledger service
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Stock ledger row
#[derive(Debug, Clone, FromRow)]
pub struct StockEntry {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockEntry {
    pub fn into_view(self) -> StockEntryView {
        StockEntryView {
            id: self.id,
            product_id: self.product_id,
            warehouse_id: self.warehouse_id,
            quantity: self.quantity,
            archived: self.archived,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn fetch_active_entry<'e>(
        executor: impl sqlx::PgExecutor<'e>,
        product_id: i64,
        warehouse_id: i64,
    ) -> AppResult<Option<StockEntry>> {
        let entry = sqlx::query_as::<_, StockEntry>(
            r#"
            SELECT id, product_id, warehouse_id, quantity, archived, created_at, updated_at
            FROM stock_entries
            WHERE product_id = $1 AND warehouse_id = $2 AND archived = FALSE
            "#,
        )
        .bind(product_id)
        .bind(warehouse_id)
        .fetch_optional(executor)
        .await?;

        Ok(entry)
    }

    /// Get the active entry for a (product, warehouse) pair
    pub async fn get_active_entry(
        &self,
        product_id: i64,
        warehouse_id: i64,
    ) -> AppResult<Option<StockEntry>> {
        Self::fetch_active_entry(&self.db, product_id, warehouse_id).await
    }

    /// Get the active entry for a pair as part of an open transaction
    pub async fn get_active_entry_in(
        &self,
        conn: &mut PgConnection,
        product_id: i64,
        warehouse_id: i64,
    ) -> AppResult<Option<StockEntry>> {
        Self::fetch_active_entry(&mut *conn, product_id, warehouse_id).await
    }

    /// Subtract `amount` from an entry as part of the caller's transaction.
    ///
    /// The guard in the UPDATE re-checks current quantity under the
    /// transaction's isolation, so a pre-check that has since lost a race
    /// fails here instead of driving the quantity negative.
    pub async fn decrement(
        &self,
        conn: &mut PgConnection,
        entry_id: i64,
        amount: i32,
    ) -> AppResult<StockEntry> {
        if amount <= 0 {
            return Err(AppError::InvalidInput(format!(
                "decrement amount must be positive, got {}",
                amount
            )));
        }

        let updated = sqlx::query_as::<_, StockEntry>(
            r#"
            UPDATE stock_entries
            SET quantity = quantity - $1, updated_at = NOW()
            WHERE id = $2 AND archived = FALSE AND quantity >= $1
            RETURNING id, product_id, warehouse_id, quantity, archived, created_at, updated_at
            "#,
        )
        .bind(amount)
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?;

        match updated {
            Some(entry) => Ok(entry),
            None => {
                // Guard lost: report current availability, or missing entry
                let current = sqlx::query_as::<_, StockEntry>(
                    r#"
                    SELECT id, product_id, warehouse_id, quantity, archived, created_at, updated_at
                    FROM stock_entries
                    WHERE id = $1 AND archived = FALSE
                    "#,
                )
                .bind(entry_id)
                .fetch_optional(&mut *conn)
                .await?;

                match current {
                    Some(entry) => Err(AppError::InsufficientStock {
                        product_id: entry.product_id,
                        available: entry.quantity,
                        requested: amount,
                    }),
                    None => Err(AppError::NotFoundOrArchived(format!(
                        "Stock entry {}",
                        entry_id
                    ))),
                }
            }
        }
    }

    /// Create a stock entry for a (product, warehouse) pair
    pub async fn create(
        &self,
        product_id: i64,
        warehouse_id: i64,
        initial_quantity: i32,
    ) -> AppResult<StockEntry> {
        if initial_quantity < 0 {
            return Err(AppError::InvalidInput(format!(
                "initial quantity must not be negative, got {}",
                initial_quantity
            )));
        }

        let catalog = CatalogService::new(self.db.clone());
        catalog.get_active_product(product_id).await?;
        catalog.get_active_warehouse(warehouse_id).await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM stock_entries WHERE product_id = $1 AND warehouse_id = $2 AND archived = FALSE)"
        )
        .bind(product_id)
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::Conflict(format!(
                "an active stock entry for product {} at warehouse {} already exists",
                product_id, warehouse_id
            )));
        }

        // A partial unique index on (product_id, warehouse_id) backs this up
        // against concurrent creation.
        let entry = sqlx::query_as::<_, StockEntry>(
            r#"
            INSERT INTO stock_entries (product_id, warehouse_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, warehouse_id, quantity, archived, created_at, updated_at
            "#,
        )
        .bind(product_id)
        .bind(warehouse_id)
        .bind(initial_quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "an active stock entry for product {} at warehouse {} already exists",
                        product_id, warehouse_id
                    ));
                }
            }
            AppError::DatabaseError(err)
        })?;

        Ok(entry)
    }

    /// Administrative direct set of an entry's quantity
    pub async fn set_quantity(
        &self,
        user_id: Option<i64>,
        entry_id: i64,
        new_quantity: i32,
    ) -> AppResult<StockEntry> {
        if new_quantity < 0 {
            return Err(AppError::InvalidInput(format!(
                "quantity must not be negative, got {}",
                new_quantity
            )));
        }

        let entry = sqlx::query_as::<_, StockEntry>(
            r#"
            UPDATE stock_entries
            SET quantity = $1, updated_at = NOW()
            WHERE id = $2 AND archived = FALSE
            RETURNING id, product_id, warehouse_id, quantity, archived, created_at, updated_at
            "#,
        )
        .bind(new_quantity)
        .bind(entry_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFoundOrArchived(format!("Stock entry {}", entry_id)))?;

        AuditService::new(self.db.clone()).record_detached(
            user_id,
            format!("set quantity to {}", new_quantity),
            "stock_entries",
            entry_id,
        );

        Ok(entry)
    }
}

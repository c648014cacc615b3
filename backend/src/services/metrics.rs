//! Best-effort metric counters

use sqlx::PgPool;

use crate::error::AppResult;

/// Counter incremented once per committed order
pub const ORDERS_CREATED: &str = "orders_created";

#[derive(Clone)]
pub struct MetricsService {
    db: PgPool,
}

impl MetricsService {
    /// Create a new MetricsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Increment a named counter
    pub async fn increment(&self, counter: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO metric_counters (name, value)
            VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET value = metric_counters.value + 1
            "#,
        )
        .bind(counter)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Fire-and-forget increment used after a commit; failure never fails
    /// the operation that triggered it.
    pub fn increment_detached(&self, counter: &'static str) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(err) = service.increment(counter).await {
                tracing::warn!("Metric increment failed for {}: {}", counter, err);
            }
        });
    }
}

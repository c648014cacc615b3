//! Append-only audit sink: who did what, to which record

use sqlx::PgPool;

use crate::error::AppResult;

#[derive(Clone)]
pub struct AuditService {
    db: PgPool,
}

impl AuditService {
    /// Create a new AuditService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append one audit row
    pub async fn record(
        &self,
        user_id: Option<i64>,
        action: &str,
        table_name: &str,
        record_id: i64,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audit_log (user_id, action, table_name, record_id) VALUES ($1, $2, $3, $4)"
        )
        .bind(user_id)
        .bind(action)
        .bind(table_name)
        .bind(record_id)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Fire-and-forget variant used after a commit. Failures are logged and
    /// swallowed so they can never fail an already committed operation.
    pub fn record_detached(
        &self,
        user_id: Option<i64>,
        action: String,
        table_name: &'static str,
        record_id: i64,
    ) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(err) = service
                .record(user_id, &action, table_name, record_id)
                .await
            {
                tracing::warn!(
                    "Audit record failed for {} {}: {}",
                    table_name,
                    record_id,
                    err
                );
            }
        });
    }
}

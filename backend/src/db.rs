//! Transaction boundary for multi-step mutations
//!
//! Every mutating phase that must be all-or-nothing runs inside a
//! [`UnitOfWork`]. Steps take the scope's `&mut PgConnection`, so a workflow
//! called from inside another workflow joins the outer scope's transaction
//! instead of opening an independent one.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::AppResult;

/// A scoped atomic unit of work over the shared pool.
///
/// Dropping the scope without committing rolls every write back. Request
/// cancellation during the commit phase therefore behaves like a failure:
/// the transaction is dropped and no partial state survives.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    /// Open a new transaction scope.
    pub async fn begin(pool: &PgPool) -> AppResult<Self> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Connection for work that must be part of this atomic unit.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Commit every write performed through this scope.
    pub async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

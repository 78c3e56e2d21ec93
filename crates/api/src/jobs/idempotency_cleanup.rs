//! Purges ledger idempotency keys past their retention window.
//!
//! A purged key no longer deduplicates: a retry arriving after the window
//! records a new entry.

use persistence::repositories::IdempotencyKeyRepository;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

pub struct IdempotencyCleanupJob {
    pool: PgPool,
    retention_hours: i32,
}

impl IdempotencyCleanupJob {
    pub fn new(pool: PgPool, retention_hours: i32) -> Self {
        Self {
            pool,
            retention_hours,
        }
    }
}

#[async_trait::async_trait]
impl Job for IdempotencyCleanupJob {
    fn name(&self) -> &'static str {
        "idempotency_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> anyhow::Result<()> {
        let deleted = IdempotencyKeyRepository::new(self.pool.clone())
            .delete_older_than_hours(self.retention_hours)
            .await?;

        info!(
            deleted = deleted,
            retention_hours = self.retention_hours,
            "Purged expired ledger idempotency keys"
        );
        Ok(())
    }
}

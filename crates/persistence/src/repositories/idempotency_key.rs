//! Ledger idempotency keys.
//!
//! Keys are looked up and claimed on the ledger transaction's own connection,
//! so a claimed key and the entry it points at commit or roll back together.

use sqlx::{PgConnection, PgPool};

use crate::entities::LedgerScope;
use crate::metrics::QueryTimer;

/// Entry id previously produced for `key_hash`, if any.
pub(crate) async fn find_entry_id(
    conn: &mut PgConnection,
    key_hash: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT entry_id FROM ledger_idempotency_keys WHERE key_hash = $1
        "#,
    )
    .bind(key_hash)
    .fetch_optional(conn)
    .await
}

/// Claim `key_hash` for `entry_id`. Returns false when a concurrent writer
/// claimed it first.
pub(crate) async fn claim(
    conn: &mut PgConnection,
    key_hash: &str,
    scope: LedgerScope,
    user_id: i64,
    entry_id: i64,
) -> Result<bool, sqlx::Error> {
    let claimed = sqlx::query_scalar::<_, String>(
        r#"
        INSERT INTO ledger_idempotency_keys (key_hash, scope, user_id, entry_id)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (key_hash) DO NOTHING
        RETURNING key_hash
        "#,
    )
    .bind(key_hash)
    .bind(scope.as_str())
    .bind(user_id)
    .bind(entry_id)
    .fetch_optional(conn)
    .await?;

    Ok(claimed.is_some())
}

/// Repository for maintenance of stored idempotency keys.
#[derive(Clone)]
pub struct IdempotencyKeyRepository {
    pool: PgPool,
}

impl IdempotencyKeyRepository {
    /// Creates a new IdempotencyKeyRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete keys older than the specified hours.
    /// Returns the number of deleted records.
    pub async fn delete_older_than_hours(&self, hours: i32) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_old_ledger_idempotency_keys");
        let result = sqlx::query(
            r#"
            DELETE FROM ledger_idempotency_keys
            WHERE created_at < NOW() - make_interval(hours => $1)
            "#,
        )
        .bind(hours)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

//! Stock opname (condition audit) repository.

use domain::models::AssetCondition;
use sqlx::{PgConnection, PgPool};
use tracing::info;

use super::asset::{ensure_user, lock_asset};
use super::idempotency_key;
use super::LedgerWrite;
use crate::entities::{AssetConditionDb, LedgerScope, OpnameEntryEntity};
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

/// Append an audit entry and set the asset's condition. Caller holds the row lock.
pub(crate) async fn insert_opname(
    conn: &mut PgConnection,
    item_id: i64,
    condition_before: AssetConditionDb,
    condition_after: AssetConditionDb,
    notes: Option<&str>,
    operator_id: i64,
) -> Result<i64, LedgerError> {
    let entry_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO stock_opname (item_id, condition_before, condition_after, notes, operator_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(item_id)
    .bind(condition_before)
    .bind(condition_after)
    .bind(notes)
    .bind(operator_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("UPDATE inventory_items SET condition = $2 WHERE id = $1")
        .bind(item_id)
        .bind(condition_after)
        .execute(&mut *conn)
        .await?;

    Ok(entry_id)
}

/// Repository for the condition audit ledger.
#[derive(Clone)]
pub struct OpnameRepository {
    pool: PgPool,
}

impl OpnameRepository {
    /// Creates a new OpnameRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a condition check, snapshotting the current condition.
    pub async fn record_check(
        &self,
        item_id: i64,
        condition_after: AssetCondition,
        notes: Option<&str>,
        operator_id: i64,
        key_hash: Option<&str>,
    ) -> Result<LedgerWrite, LedgerError> {
        let timer = QueryTimer::new("record_opname");
        let mut tx = self.pool.begin().await?;

        if let Some(hash) = key_hash {
            if let Some(entry_id) = idempotency_key::find_entry_id(&mut tx, hash).await? {
                timer.record();
                return Ok(LedgerWrite::replayed(entry_id));
            }
        }

        let before = lock_asset(&mut tx, item_id).await?;
        ensure_user(&mut tx, operator_id).await?;

        let after = AssetConditionDb::from(condition_after);
        let entry_id =
            insert_opname(&mut tx, item_id, before.condition, after, notes, operator_id).await?;

        if let Some(hash) = key_hash {
            let claimed =
                idempotency_key::claim(&mut tx, hash, LedgerScope::Opname, operator_id, entry_id)
                    .await?;
            if !claimed {
                tx.rollback().await?;
                let mut conn = self.pool.acquire().await?;
                let winner = idempotency_key::find_entry_id(&mut conn, hash)
                    .await?
                    .ok_or_else(|| LedgerError::not_found("Idempotency key"))?;
                timer.record();
                return Ok(LedgerWrite::replayed(winner));
            }
        }

        tx.commit().await?;
        timer.record();

        info!(
            entry_id = entry_id,
            item_id = item_id,
            condition_before = ?before.condition,
            condition_after = condition_after.as_str(),
            "Stock opname recorded"
        );

        Ok(LedgerWrite::created(entry_id))
    }

    /// List entries newest first, optionally for one asset.
    pub async fn list(&self, item_id: Option<i64>) -> Result<Vec<OpnameEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_opname");
        let result = sqlx::query_as::<_, OpnameEntryEntity>(
            r#"
            SELECT s.id, s.item_id, s.check_date, s.condition_before, s.condition_after, s.notes,
                   s.operator_id, i.name AS item_name, i.barcode, u.name AS operator_name
            FROM stock_opname s
            JOIN inventory_items i ON i.id = s.item_id
            JOIN users u ON u.id = s.operator_id
            WHERE ($1::BIGINT IS NULL OR s.item_id = $1)
            ORDER BY s.check_date DESC, s.id DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

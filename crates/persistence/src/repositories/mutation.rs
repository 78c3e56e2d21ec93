//! Mutation ledger repository.

use sqlx::{PgConnection, PgPool};
use tracing::info;

use super::asset::{ensure_room, ensure_user, lock_asset};
use super::idempotency_key;
use super::LedgerWrite;
use crate::entities::{LedgerScope, MutationEntryEntity};
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

/// Append a mutation entry and move the asset. Caller holds the row lock.
pub(crate) async fn insert_mutation(
    conn: &mut PgConnection,
    item_id: i64,
    from_room_id: Option<i64>,
    to_room_id: i64,
    reason: Option<&str>,
    operator_id: i64,
) -> Result<i64, LedgerError> {
    let entry_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO mutations (item_id, from_room_id, to_room_id, reason, operator_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(item_id)
    .bind(from_room_id)
    .bind(to_room_id)
    .bind(reason)
    .bind(operator_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query("UPDATE inventory_items SET room_id = $2 WHERE id = $1")
        .bind(item_id)
        .bind(to_room_id)
        .execute(&mut *conn)
        .await?;

    Ok(entry_id)
}

/// Repository for the mutation ledger.
#[derive(Clone)]
pub struct MutationRepository {
    pool: PgPool,
}

impl MutationRepository {
    /// Creates a new MutationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Move an asset to `to_room_id`, recording the previous room.
    ///
    /// With `key_hash`, a repeated request returns the entry produced the
    /// first time instead of writing a new one.
    pub async fn record_move(
        &self,
        item_id: i64,
        to_room_id: i64,
        reason: Option<&str>,
        operator_id: i64,
        key_hash: Option<&str>,
    ) -> Result<LedgerWrite, LedgerError> {
        let timer = QueryTimer::new("record_mutation");
        let mut tx = self.pool.begin().await?;

        if let Some(hash) = key_hash {
            if let Some(entry_id) = idempotency_key::find_entry_id(&mut tx, hash).await? {
                timer.record();
                return Ok(LedgerWrite::replayed(entry_id));
            }
        }

        let before = lock_asset(&mut tx, item_id).await?;
        ensure_room(&mut tx, to_room_id).await?;
        ensure_user(&mut tx, operator_id).await?;

        let entry_id = insert_mutation(
            &mut tx,
            item_id,
            before.room_id,
            to_room_id,
            reason,
            operator_id,
        )
        .await?;

        if let Some(hash) = key_hash {
            let claimed =
                idempotency_key::claim(&mut tx, hash, LedgerScope::Mutation, operator_id, entry_id)
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
            from_room_id = ?before.room_id,
            to_room_id = to_room_id,
            "Mutation recorded"
        );

        Ok(LedgerWrite::created(entry_id))
    }

    /// List entries newest first, optionally for one asset.
    pub async fn list(
        &self,
        item_id: Option<i64>,
    ) -> Result<Vec<MutationEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mutations");
        let result = sqlx::query_as::<_, MutationEntryEntity>(
            r#"
            SELECT m.id, m.item_id, m.from_room_id, m.to_room_id, m.mutation_date, m.reason,
                   m.operator_id, i.name AS item_name, i.barcode,
                   rf.name AS from_room_name, rt.name AS to_room_name,
                   u.name AS operator_name
            FROM mutations m
            JOIN inventory_items i ON i.id = m.item_id
            LEFT JOIN rooms rf ON rf.id = m.from_room_id
            JOIN rooms rt ON rt.id = m.to_room_id
            JOIN users u ON u.id = m.operator_id
            WHERE ($1::BIGINT IS NULL OR m.item_id = $1)
            ORDER BY m.mutation_date DESC, m.id DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

//! Asset registry repository.

use domain::models::asset::{RegisterAssetRequest, UpdateAssetRequest};
use domain::models::mutation::DIRECT_EDIT_REASON;
use domain::models::opname::DIRECT_EDIT_NOTES;
use domain::models::{AssetCategory, AssetStatus};
use sqlx::{PgConnection, PgPool};

use super::mutation::insert_mutation;
use super::opname::insert_opname;
use crate::entities::{
    AssetCategoryDb, AssetConditionDb, AssetEntity, AssetSnapshotEntity, AssetStatusDb,
};
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

const ASSET_COLUMNS: &str = r#"
    i.id, i.barcode, i.name, i.category, i.brand, i.specification, i.year_acquired,
    i.source_fund, i.price, i.condition, i.status, i.room_id, r.name AS room_name,
    i.pic_name, i.notes, i.created_at
"#;

/// Lock the asset row and read its current room and condition.
pub(crate) async fn lock_asset(
    conn: &mut PgConnection,
    item_id: i64,
) -> Result<AssetSnapshotEntity, LedgerError> {
    sqlx::query_as::<_, AssetSnapshotEntity>(
        r#"
        SELECT room_id, condition
        FROM inventory_items
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(item_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| LedgerError::not_found("Asset"))
}

/// Fail with NotFound unless the room exists.
pub(crate) async fn ensure_room(conn: &mut PgConnection, room_id: i64) -> Result<(), LedgerError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)")
        .bind(room_id)
        .fetch_one(conn)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(LedgerError::not_found("Room"))
    }
}

/// Fail with NotFound unless the user exists.
pub(crate) async fn ensure_user(conn: &mut PgConnection, user_id: i64) -> Result<(), LedgerError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(conn)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(LedgerError::not_found("Operator"))
    }
}

/// Ledger entries written on behalf of a direct edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectEditOutcome {
    pub mutation_id: Option<i64>,
    pub opname_id: Option<i64>,
}

/// Repository for inventory items.
#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Creates a new AssetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List assets with optional category and status filters, ordered by id.
    pub async fn list(
        &self,
        category: Option<AssetCategory>,
        status: Option<AssetStatus>,
    ) -> Result<Vec<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_assets");
        let sql = format!(
            r#"
            SELECT {ASSET_COLUMNS}
            FROM inventory_items i
            LEFT JOIN rooms r ON r.id = i.room_id
            WHERE ($1::asset_category IS NULL OR i.category = $1)
              AND ($2::asset_status IS NULL OR i.status = $2)
            ORDER BY i.id
            "#
        );
        let result = sqlx::query_as::<_, AssetEntity>(&sql)
            .bind(category.map(AssetCategoryDb::from))
            .bind(status.map(AssetStatusDb::from))
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find an asset by surrogate id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_asset_by_id");
        let sql = format!(
            r#"
            SELECT {ASSET_COLUMNS}
            FROM inventory_items i
            LEFT JOIN rooms r ON r.id = i.room_id
            WHERE i.id = $1
            "#
        );
        let result = sqlx::query_as::<_, AssetEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find an asset by its printed barcode.
    pub async fn find_by_barcode(&self, barcode: &str) -> Result<Option<AssetEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_asset_by_barcode");
        let sql = format!(
            r#"
            SELECT {ASSET_COLUMNS}
            FROM inventory_items i
            LEFT JOIN rooms r ON r.id = i.room_id
            WHERE i.barcode = $1
            "#
        );
        let result = sqlx::query_as::<_, AssetEntity>(&sql)
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Register a new asset with status `aktif`.
    pub async fn register(&self, request: &RegisterAssetRequest) -> Result<i64, LedgerError> {
        let timer = QueryTimer::new("register_asset");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO inventory_items
                (barcode, name, category, brand, specification, year_acquired, source_fund,
                 price, condition, status, room_id, pic_name, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'aktif', $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(request.barcode.trim())
        .bind(request.name.trim())
        .bind(AssetCategoryDb::from(request.category))
        .bind(request.brand.as_deref())
        .bind(request.specification.as_deref())
        .bind(request.year_acquired)
        .bind(request.source_fund.as_deref())
        .bind(request.price)
        .bind(AssetConditionDb::from(request.condition))
        .bind(request.room_id)
        .bind(request.pic_name.as_deref())
        .bind(request.notes.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// Overwrite the mutable fields of an asset.
    ///
    /// A changed condition or room is also appended to the matching ledger
    /// with `operator_id` as the operator, in the same transaction, so the
    /// current state keeps matching the latest ledger entry.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateAssetRequest,
        operator_id: i64,
    ) -> Result<DirectEditOutcome, LedgerError> {
        let timer = QueryTimer::new("update_asset");
        let mut tx = self.pool.begin().await?;

        let before = lock_asset(&mut tx, id).await?;

        if let Some(room_id) = request.room_id {
            ensure_room(&mut tx, room_id).await?;
        } else if before.room_id.is_some() {
            return Err(LedgerError::Validation(
                "An assigned room cannot be cleared".to_string(),
            ));
        }

        let new_condition = AssetConditionDb::from(request.condition);
        let condition_changed = before.condition != new_condition;
        let room_changed = before.room_id != request.room_id;
        if condition_changed || room_changed {
            ensure_user(&mut tx, operator_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE inventory_items
            SET name = $2, brand = $3, specification = $4, condition = $5, status = $6,
                room_id = $7, pic_name = $8, notes = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.name.trim())
        .bind(request.brand.as_deref())
        .bind(request.specification.as_deref())
        .bind(new_condition)
        .bind(AssetStatusDb::from(request.status))
        .bind(request.room_id)
        .bind(request.pic_name.as_deref())
        .bind(request.notes.as_deref())
        .execute(&mut *tx)
        .await?;

        let mut outcome = DirectEditOutcome::default();

        if condition_changed {
            let entry_id = insert_opname(
                &mut tx,
                id,
                before.condition,
                new_condition,
                Some(DIRECT_EDIT_NOTES),
                operator_id,
            )
            .await?;
            outcome.opname_id = Some(entry_id);
        }

        if let (true, Some(to_room_id)) = (room_changed, request.room_id) {
            let entry_id = insert_mutation(
                &mut tx,
                id,
                before.room_id,
                to_room_id,
                Some(DIRECT_EDIT_REASON),
                operator_id,
            )
            .await?;
            outcome.mutation_id = Some(entry_id);
        }

        tx.commit().await?;
        timer.record();
        Ok(outcome)
    }
}

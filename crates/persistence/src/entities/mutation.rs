//! Mutation ledger entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of mutations joined with item, room and operator names.
#[derive(Debug, Clone, FromRow)]
pub struct MutationEntryEntity {
    pub id: i64,
    pub item_id: i64,
    pub from_room_id: Option<i64>,
    pub to_room_id: i64,
    pub mutation_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub operator_id: i64,
    pub item_name: String,
    pub barcode: String,
    pub from_room_name: Option<String>,
    pub to_room_name: String,
    pub operator_name: String,
}

impl From<MutationEntryEntity> for domain::models::MutationEntry {
    fn from(entity: MutationEntryEntity) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            from_room_id: entity.from_room_id,
            to_room_id: entity.to_room_id,
            mutation_date: entity.mutation_date,
            reason: entity.reason,
            operator_id: entity.operator_id,
            item_name: entity.item_name,
            barcode: entity.barcode,
            from_room_name: entity.from_room_name,
            to_room_name: entity.to_room_name,
            operator_name: entity.operator_name,
        }
    }
}

//! Stock opname entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::asset::AssetConditionDb;

/// Row of stock_opname joined with item identity and operator name.
#[derive(Debug, Clone, FromRow)]
pub struct OpnameEntryEntity {
    pub id: i64,
    pub item_id: i64,
    pub check_date: DateTime<Utc>,
    pub condition_before: AssetConditionDb,
    pub condition_after: AssetConditionDb,
    pub notes: Option<String>,
    pub operator_id: i64,
    pub item_name: String,
    pub barcode: String,
    pub operator_name: String,
}

impl From<OpnameEntryEntity> for domain::models::OpnameEntry {
    fn from(entity: OpnameEntryEntity) -> Self {
        Self {
            id: entity.id,
            item_id: entity.item_id,
            check_date: entity.check_date,
            condition_before: entity.condition_before.into(),
            condition_after: entity.condition_after.into(),
            notes: entity.notes,
            operator_id: entity.operator_id,
            item_name: entity.item_name,
            barcode: entity.barcode,
            operator_name: entity.operator_name,
        }
    }
}

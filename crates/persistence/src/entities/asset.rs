//! Asset entity (database row mapping) and the enum column types it uses.

use chrono::{DateTime, Utc};
use domain::models::{AssetCategory, AssetCondition, AssetStatus};
use sqlx::FromRow;

/// Database enum for asset_category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "asset_category", rename_all = "lowercase")]
pub enum AssetCategoryDb {
    Umum,
    Tanah,
    Bangunan,
}

impl From<AssetCategoryDb> for AssetCategory {
    fn from(db: AssetCategoryDb) -> Self {
        match db {
            AssetCategoryDb::Umum => AssetCategory::Umum,
            AssetCategoryDb::Tanah => AssetCategory::Tanah,
            AssetCategoryDb::Bangunan => AssetCategory::Bangunan,
        }
    }
}

impl From<AssetCategory> for AssetCategoryDb {
    fn from(category: AssetCategory) -> Self {
        match category {
            AssetCategory::Umum => AssetCategoryDb::Umum,
            AssetCategory::Tanah => AssetCategoryDb::Tanah,
            AssetCategory::Bangunan => AssetCategoryDb::Bangunan,
        }
    }
}

/// Database enum for asset_condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "asset_condition", rename_all = "snake_case")]
pub enum AssetConditionDb {
    Baik,
    RusakRingan,
    RusakBerat,
}

impl From<AssetConditionDb> for AssetCondition {
    fn from(db: AssetConditionDb) -> Self {
        match db {
            AssetConditionDb::Baik => AssetCondition::Baik,
            AssetConditionDb::RusakRingan => AssetCondition::RusakRingan,
            AssetConditionDb::RusakBerat => AssetCondition::RusakBerat,
        }
    }
}

impl From<AssetCondition> for AssetConditionDb {
    fn from(condition: AssetCondition) -> Self {
        match condition {
            AssetCondition::Baik => AssetConditionDb::Baik,
            AssetCondition::RusakRingan => AssetConditionDb::RusakRingan,
            AssetCondition::RusakBerat => AssetConditionDb::RusakBerat,
        }
    }
}

/// Database enum for asset_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "asset_status")]
pub enum AssetStatusDb {
    #[sqlx(rename = "aktif")]
    Aktif,
    #[sqlx(rename = "non-aktif")]
    NonAktif,
}

impl From<AssetStatusDb> for AssetStatus {
    fn from(db: AssetStatusDb) -> Self {
        match db {
            AssetStatusDb::Aktif => AssetStatus::Aktif,
            AssetStatusDb::NonAktif => AssetStatus::NonAktif,
        }
    }
}

impl From<AssetStatus> for AssetStatusDb {
    fn from(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Aktif => AssetStatusDb::Aktif,
            AssetStatus::NonAktif => AssetStatusDb::NonAktif,
        }
    }
}

/// Row of inventory_items joined with the current room name.
#[derive(Debug, Clone, FromRow)]
pub struct AssetEntity {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub category: AssetCategoryDb,
    pub brand: Option<String>,
    pub specification: Option<String>,
    pub year_acquired: Option<i32>,
    pub source_fund: Option<String>,
    pub price: f64,
    pub condition: AssetConditionDb,
    pub status: AssetStatusDb,
    pub room_id: Option<i64>,
    pub room_name: Option<String>,
    pub pic_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AssetEntity> for domain::models::Asset {
    fn from(entity: AssetEntity) -> Self {
        Self {
            id: entity.id,
            barcode: entity.barcode,
            name: entity.name,
            category: entity.category.into(),
            brand: entity.brand,
            specification: entity.specification,
            year_acquired: entity.year_acquired,
            source_fund: entity.source_fund,
            price: entity.price,
            condition: entity.condition.into(),
            status: entity.status.into(),
            room_id: entity.room_id,
            room_name: entity.room_name,
            pic_name: entity.pic_name,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}

/// The locked current-state columns read at the start of a ledger write.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct AssetSnapshotEntity {
    pub room_id: Option<i64>,
    pub condition: AssetConditionDb,
}

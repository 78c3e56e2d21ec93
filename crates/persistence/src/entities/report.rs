//! Aggregate rows for reports.

use sqlx::FromRow;

/// Row of the summary query.
#[derive(Debug, Clone, FromRow)]
pub struct SummaryEntity {
    pub total_items: i64,
    pub total_land: i64,
    pub total_building: i64,
    pub total_damaged: i64,
    pub procurement_pending: i64,
}

impl From<SummaryEntity> for domain::models::Summary {
    fn from(entity: SummaryEntity) -> Self {
        Self {
            total_items: entity.total_items,
            total_land: entity.total_land,
            total_building: entity.total_building,
            total_damaged: entity.total_damaged,
            procurement_pending: entity.procurement_pending,
        }
    }
}

/// One `label, count` row of a breakdown query.
#[derive(Debug, Clone, FromRow)]
pub struct LabelCountEntity {
    pub label: String,
    pub count: i64,
}

impl From<LabelCountEntity> for domain::models::report::LabelCount {
    fn from(entity: LabelCountEntity) -> Self {
        Self {
            label: entity.label,
            count: entity.count,
        }
    }
}

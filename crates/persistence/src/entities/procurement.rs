//! Procurement request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ProcurementStatus;
use sqlx::FromRow;

/// Database enum for procurement_status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "procurement_status", rename_all = "lowercase")]
pub enum ProcurementStatusDb {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl From<ProcurementStatusDb> for ProcurementStatus {
    fn from(db: ProcurementStatusDb) -> Self {
        match db {
            ProcurementStatusDb::Pending => ProcurementStatus::Pending,
            ProcurementStatusDb::Approved => ProcurementStatus::Approved,
            ProcurementStatusDb::Rejected => ProcurementStatus::Rejected,
            ProcurementStatusDb::Completed => ProcurementStatus::Completed,
        }
    }
}

impl From<ProcurementStatus> for ProcurementStatusDb {
    fn from(status: ProcurementStatus) -> Self {
        match status {
            ProcurementStatus::Pending => ProcurementStatusDb::Pending,
            ProcurementStatus::Approved => ProcurementStatusDb::Approved,
            ProcurementStatus::Rejected => ProcurementStatusDb::Rejected,
            ProcurementStatus::Completed => ProcurementStatusDb::Completed,
        }
    }
}

/// Row of procurement_requests joined with the requester's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProcurementRequestEntity {
    pub id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub estimated_price: f64,
    pub purpose: Option<String>,
    pub status: ProcurementStatusDb,
    pub requester_id: i64,
    pub requester_name: String,
    pub request_date: DateTime<Utc>,
}

impl From<ProcurementRequestEntity> for domain::models::ProcurementRequest {
    fn from(entity: ProcurementRequestEntity) -> Self {
        Self {
            id: entity.id,
            item_name: entity.item_name,
            quantity: entity.quantity,
            estimated_price: entity.estimated_price,
            purpose: entity.purpose,
            status: entity.status.into(),
            requester_id: entity.requester_id,
            requester_name: entity.requester_name,
            request_date: entity.request_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            ProcurementStatus::Pending,
            ProcurementStatus::Approved,
            ProcurementStatus::Rejected,
            ProcurementStatus::Completed,
        ] {
            let db: ProcurementStatusDb = s.into();
            assert_eq!(ProcurementStatus::from(db), s);
        }
    }
}

//! Stock opname (condition audit) ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::asset::AssetCondition;

/// Notes recorded when a condition change comes from a direct asset edit.
pub const DIRECT_EDIT_NOTES: &str = "direct edit";

/// An audit entry joined with item identity and operator name.
///
/// `condition_before` is the asset's condition at write time and is never
/// taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpnameEntry {
    pub id: i64,
    pub item_id: i64,
    pub check_date: DateTime<Utc>,
    pub condition_before: AssetCondition,
    pub condition_after: AssetCondition,
    pub notes: Option<String>,
    pub operator_id: i64,
    pub item_name: String,
    pub barcode: String,
    pub operator_name: String,
}

/// POST /api/opname body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordOpnameRequest {
    pub item_id: i64,

    pub condition_after: AssetCondition,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,

    /// Defaults to the authenticated user.
    pub operator_id: Option<i64>,
}

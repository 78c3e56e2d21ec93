//! Mutation ledger: recorded location changes of an asset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reason recorded when a room change comes from a direct asset edit.
pub const DIRECT_EDIT_REASON: &str = "direct edit";

/// A ledger entry joined with the names the history table displays.
///
/// `from_room_id` is the asset's room at write time and is never taken from
/// the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationEntry {
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

/// POST /api/mutations body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordMutationRequest {
    pub item_id: i64,

    pub to_room_id: i64,

    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,

    /// Defaults to the authenticated user.
    pub operator_id: Option<i64>,
}

/// Query parameters shared by the two ledger listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerListQuery {
    #[serde(default, deserialize_with = "super::empty_string_as_none")]
    pub item_id: Option<i64>,
}

//! Domain models for SIMSARPRAS.

pub mod asset;
pub mod mutation;
pub mod opname;
pub mod procurement;
pub mod report;
pub mod room;
pub mod user;

pub use asset::{Asset, AssetCategory, AssetCondition, AssetStatus};
pub use mutation::MutationEntry;
pub use opname::OpnameEntry;
pub use procurement::{ProcurementRequest, ProcurementStatus};
pub use report::{Breakdown, Summary};
pub use room::Room;
pub use user::{User, UserRole};

use serde::{Deserialize, Deserializer, Serialize};

/// `{ "success": true, "id": .. }` returned by create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self { success: true, id }
    }
}

/// `{ "success": true }` returned by update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response for ledger writes. `replayed` is set when an Idempotency-Key
/// matched an earlier write and no new entry was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerWriteResponse {
    pub success: bool,
    pub id: i64,
    pub replayed: bool,
}

/// Treats a missing or empty query value as `None`.
pub(crate) fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

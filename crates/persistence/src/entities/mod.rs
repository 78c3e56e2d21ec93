//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod asset;
pub mod idempotency_key;
pub mod mutation;
pub mod opname;
pub mod procurement;
pub mod report;
pub mod room;
pub mod user;

pub use asset::{
    AssetCategoryDb, AssetConditionDb, AssetEntity, AssetSnapshotEntity, AssetStatusDb,
};
pub use idempotency_key::LedgerScope;
pub use mutation::MutationEntryEntity;
pub use opname::OpnameEntryEntity;
pub use procurement::{ProcurementRequestEntity, ProcurementStatusDb};
pub use report::{LabelCountEntity, SummaryEntity};
pub use room::RoomEntity;
pub use user::{UserEntity, UserRoleDb};

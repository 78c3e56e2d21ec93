//! Repository implementations for database operations.

pub mod asset;
pub mod idempotency_key;
pub mod mutation;
pub mod opname;
pub mod procurement;
pub mod report;
pub mod room;
pub mod user;

pub use asset::{AssetRepository, DirectEditOutcome};
pub use idempotency_key::IdempotencyKeyRepository;
pub use mutation::MutationRepository;
pub use opname::OpnameRepository;
pub use procurement::ProcurementRepository;
pub use report::ReportRepository;
pub use room::RoomRepository;
pub use user::UserRepository;

/// Result of a ledger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerWrite {
    pub entry_id: i64,
    /// True when an idempotency key matched an earlier write.
    pub replayed: bool,
}

impl LedgerWrite {
    pub fn created(entry_id: i64) -> Self {
        Self {
            entry_id,
            replayed: false,
        }
    }

    pub fn replayed(entry_id: i64) -> Self {
        Self {
            entry_id,
            replayed: true,
        }
    }
}

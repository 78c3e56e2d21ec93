//! Background job scheduler and job implementations.

mod idempotency_cleanup;
mod pool_metrics;
mod scheduler;

pub use idempotency_cleanup::IdempotencyCleanupJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};

//! External service integrations.

pub mod admin_bootstrap;
pub mod ai_analysis;

pub use admin_bootstrap::{bootstrap_admin, BootstrapError, BootstrapOutcome};
pub use ai_analysis::{provider_from_config, GeminiClient};

//! Admin bootstrap service for initial setup.
//!
//! Creates the first admin user on startup if configured via environment variables.
//! Running it again with the same username is a no-op.

use domain::models::UserRole;
use persistence::repositories::UserRepository;
use persistence::LedgerError;
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Could not create admin: {0}")]
    Create(#[from] LedgerError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// What the bootstrap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Skipped,
    AlreadyExists,
    Created(i64),
}

/// Bootstrap admin user if configured and not already done.
///
/// Call after migrations on startup.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if config.bootstrap_username.is_empty() {
        return Ok(BootstrapOutcome::Skipped);
    }

    if config.bootstrap_password.is_empty() {
        warn!(
            username = %config.bootstrap_username,
            "Admin bootstrap password is empty, skipping bootstrap"
        );
        return Ok(BootstrapOutcome::Skipped);
    }

    let repo = UserRepository::new(pool.clone());
    if repo
        .find_by_username(&config.bootstrap_username)
        .await?
        .is_some()
    {
        info!(
            username = %config.bootstrap_username,
            "Bootstrap user already exists - skipping bootstrap"
        );
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let user = repo
        .create(
            &config.bootstrap_username,
            &password_hash,
            &config.bootstrap_name,
            UserRole::Admin,
        )
        .await?;

    info!(
        username = %user.username,
        user_id = user.id,
        "Bootstrap admin user created successfully"
    );
    warn!(
        "SECURITY: Remove SARPRAS__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
    );

    Ok(BootstrapOutcome::Created(user.id))
}

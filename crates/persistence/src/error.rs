//! Error type for repository operations that can fail on domain grounds.

use thiserror::Error;

/// Outcome of a failed write.
///
/// Constraint violations raised by PostgreSQL are folded into the domain
/// variants so callers see NotFound/Validation rather than a raw database error.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transaction(sqlx::Error),
}

impl LedgerError {
    pub fn not_found(what: &str) -> Self {
        LedgerError::NotFound(format!("{} not found", what))
    }
}

/// Human-readable message for a unique constraint.
fn duplicate_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("inventory_items_barcode_key") => "Barcode is already registered".to_string(),
        Some("rooms_code_key") => "Room code already exists".to_string(),
        Some("users_username_key") => "Username already exists".to_string(),
        Some(other) => format!("Duplicate value violates {}", other),
        None => "Duplicate value".to_string(),
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some("23505") => {
                    return LedgerError::Validation(duplicate_message(db_err.constraint()));
                }
                Some("23503") => {
                    return LedgerError::NotFound("Referenced record not found".to_string());
                }
                Some("23514") | Some("22P02") => {
                    return LedgerError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return LedgerError::NotFound("Record not found".to_string());
        }
        LedgerError::Transaction(err)
    }
}

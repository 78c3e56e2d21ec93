//! Domain layer for the SIMSARPRAS backend.
//!
//! This crate contains:
//! - Domain models (assets, rooms, ledger entries, procurement, users)
//! - Request/response payloads shared by the API
//! - Domain services (procurement transition policy, AI analysis seam)

pub mod models;
pub mod services;

//! Shared utilities for the SIMSARPRAS backend.
//!
//! This crate provides functionality used across all other crates:
//! - Hashing helpers (idempotency tokens)
//! - Password hashing with Argon2id
//! - Session token signing and validation
//! - Field validators used by request DTOs

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod validation;

//! HTTP route handlers.

pub mod ai;
pub mod auth;
pub mod health;
pub mod inventory;
pub mod mutations;
pub mod opname;
pub mod procurement;
pub mod reports;
pub mod rooms;

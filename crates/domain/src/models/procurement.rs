//! Procurement requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Approval status of a procurement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcurementStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ProcurementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementStatus::Pending => "pending",
            ProcurementStatus::Approved => "approved",
            ProcurementStatus::Rejected => "rejected",
            ProcurementStatus::Completed => "completed",
        }
    }

    /// Transitions allowed by the strict workflow:
    /// `pending -> approved | rejected`, `approved -> completed`.
    /// Re-writing the current status is always allowed.
    pub fn can_transition_to(&self, next: ProcurementStatus) -> bool {
        use ProcurementStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, Approved) | (Pending, Rejected) | (Approved, Completed)
            )
    }
}

impl std::fmt::Display for ProcurementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A procurement request joined with the requester's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementRequest {
    pub id: i64,
    pub item_name: String,
    pub quantity: i32,
    pub estimated_price: f64,
    pub purpose: Option<String>,
    pub status: ProcurementStatus,
    pub requester_id: i64,
    pub requester_name: String,
    pub request_date: DateTime<Utc>,
}

/// POST /api/procurement body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitProcurementRequest {
    #[validate(
        length(min = 1, max = 200, message = "Item name must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub item_name: String,

    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_non_negative_amount"))]
    pub estimated_price: f64,

    #[validate(length(max = 2000, message = "Purpose must be at most 2000 characters"))]
    pub purpose: Option<String>,

    /// Defaults to the authenticated user.
    pub requester_id: Option<i64>,
}

/// PATCH /api/procurement/:id body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProcurementStatusRequest {
    pub status: ProcurementStatus,
}

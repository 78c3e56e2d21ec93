//! Read-side aggregates for the dashboard and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GET /api/reports/summary response. Counts cover active assets only,
/// except `procurement_pending`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_items: i64,
    pub total_land: i64,
    pub total_building: i64,
    pub total_damaged: i64,
    pub procurement_pending: i64,
}

/// A labelled count, e.g. one bar in a chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}

/// GET /api/reports/breakdown response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakdown {
    pub by_condition: Vec<LabelCount>,
    pub by_category: Vec<LabelCount>,
    pub by_room: Vec<LabelCount>,
    pub generated_at: DateTime<Utc>,
}

//! Aggregate reports over the registry.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::report::LabelCount;
use domain::models::{Breakdown, Summary};
use persistence::entities::LabelCountEntity;
use persistence::repositories::ReportRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Counts of active assets, recomputed on every call.
///
/// GET /api/reports/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<Summary>, ApiError> {
    let summary = ReportRepository::new(state.pool.clone()).summary().await?;
    Ok(Json(summary.into()))
}

fn labels(rows: Vec<LabelCountEntity>) -> Vec<LabelCount> {
    rows.into_iter().map(LabelCount::from).collect()
}

/// Active-asset counts per condition, category and room.
///
/// GET /api/reports/breakdown
pub async fn breakdown(State(state): State<AppState>) -> Result<Json<Breakdown>, ApiError> {
    let repo = ReportRepository::new(state.pool.clone());

    let (by_condition, by_category, by_room) = tokio::try_join!(
        repo.count_by_condition(),
        repo.count_by_category(),
        repo.count_by_room(),
    )?;

    Ok(Json(Breakdown {
        by_condition: labels(by_condition),
        by_category: labels(by_category),
        by_room: labels(by_room),
        generated_at: Utc::now(),
    }))
}

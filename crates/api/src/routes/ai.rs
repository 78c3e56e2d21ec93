//! AI analyst route.

use axum::{extract::State, Json};
use domain::models::{Asset, MutationEntry, OpnameEntry, ProcurementRequest};
use domain::services::{build_prompt, AnalysisError, AnalysisResponse, AnalysisSnapshot};
use persistence::repositories::{
    AssetRepository, MutationRepository, OpnameRepository, ProcurementRepository,
    ReportRepository,
};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Gather everything the analyst reads, at call time.
async fn collect_snapshot(state: &AppState) -> Result<AnalysisSnapshot, ApiError> {
    let pool = state.pool.clone();
    let assets = AssetRepository::new(pool.clone());
    let procurement = ProcurementRepository::new(pool.clone());
    let opname = OpnameRepository::new(pool.clone());
    let mutations = MutationRepository::new(pool.clone());
    let reports = ReportRepository::new(pool);

    let (summary, inventory, procurement, opname, mutations) = tokio::try_join!(
        reports.summary(),
        assets.list(None, None),
        procurement.list(),
        opname.list(None),
        mutations.list(None),
    )?;

    Ok(AnalysisSnapshot {
        summary: summary.into(),
        inventory: inventory.into_iter().map(Asset::from).collect(),
        procurement: procurement
            .into_iter()
            .map(ProcurementRequest::from)
            .collect(),
        opname: opname.into_iter().map(OpnameEntry::from).collect(),
        mutations: mutations.into_iter().map(MutationEntry::from).collect(),
    })
}

/// Ask the configured model for a strategic roadmap.
///
/// POST /api/ai/analysis
pub async fn analyze(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Some(provider) = state.analysis.clone() else {
        return Err(ApiError::ServiceUnavailable(
            AnalysisError::NotConfigured.to_string(),
        ));
    };

    let snapshot = collect_snapshot(&state).await?;
    let prompt = build_prompt(&snapshot)
        .map_err(|e| ApiError::Internal(format!("Failed to build prompt: {}", e)))?;

    let analysis = provider.generate(&prompt).await.map_err(|e| {
        warn!(error = %e, model = provider.model(), "AI analysis failed");
        ApiError::ServiceUnavailable(e.to_string())
    })?;

    info!(
        user_id = current.user_id,
        model = provider.model(),
        assets = snapshot.inventory.len(),
        "AI analysis generated"
    );

    Ok(Json(AnalysisResponse {
        analysis,
        model: provider.model().to_string(),
    }))
}

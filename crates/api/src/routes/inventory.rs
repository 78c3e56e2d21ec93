//! Asset registry routes.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::asset::{AssetListQuery, RegisterAssetRequest, UpdateAssetRequest};
use domain::models::{Asset, CreatedResponse, SuccessResponse};
use persistence::repositories::AssetRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, CurrentUser};
use crate::middleware::metrics::record_ledger_entry;

/// List assets, optionally filtered by category and status.
///
/// GET /api/inventory
pub async fn list_assets(
    State(state): State<AppState>,
    query: Result<Query<AssetListQuery>, QueryRejection>,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let Query(query) = query?;
    let assets = AssetRepository::new(state.pool.clone())
        .list(query.category, query.status)
        .await?
        .into_iter()
        .map(Asset::from)
        .collect();

    Ok(Json(assets))
}

/// GET /api/inventory/:id
pub async fn get_asset(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Asset>, ApiError> {
    AssetRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .map(|e| Json(e.into()))
        .ok_or_else(|| ApiError::NotFound("Asset not found".to_string()))
}

/// GET /api/inventory/barcode/:code
pub async fn get_asset_by_barcode(
    State(state): State<AppState>,
    AppPath(code): AppPath<String>,
) -> Result<Json<Asset>, ApiError> {
    AssetRepository::new(state.pool.clone())
        .find_by_barcode(&code)
        .await?
        .map(|e| Json(e.into()))
        .ok_or_else(|| ApiError::NotFound("Asset not found".to_string()))
}

/// Register a new asset.
///
/// POST /api/inventory
pub async fn register_asset(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(request): AppJson<RegisterAssetRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    request.validate()?;

    let id = AssetRepository::new(state.pool.clone())
        .register(&request)
        .await?;

    info!(
        asset_id = id,
        barcode = %request.barcode,
        user_id = current.user_id,
        "Asset registered"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// Overwrite an asset's mutable fields.
///
/// PUT /api/inventory/:id
///
/// A changed condition or room is also written to the opname or mutation
/// ledger with the caller as operator.
pub async fn update_asset(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateAssetRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    request.validate()?;

    let outcome = AssetRepository::new(state.pool.clone())
        .update(id, &request, current.user_id)
        .await?;

    if outcome.mutation_id.is_some() {
        record_ledger_entry("mutation", "direct_edit");
    }
    if outcome.opname_id.is_some() {
        record_ledger_entry("opname", "direct_edit");
    }

    info!(
        asset_id = id,
        user_id = current.user_id,
        mutation_id = ?outcome.mutation_id,
        opname_id = ?outcome.opname_id,
        "Asset updated"
    );

    Ok(Json(SuccessResponse::ok()))
}

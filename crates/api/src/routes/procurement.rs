//! Procurement request routes.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use domain::models::procurement::{SubmitProcurementRequest, UpdateProcurementStatusRequest};
use domain::models::{CreatedResponse, ProcurementRequest, SuccessResponse};
use persistence::repositories::ProcurementRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, AppPath, CurrentUser};

/// GET /api/procurement
pub async fn list_procurement(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProcurementRequest>>, ApiError> {
    let requests = ProcurementRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(ProcurementRequest::from)
        .collect();

    Ok(Json(requests))
}

/// Submit a request; it starts out pending.
///
/// POST /api/procurement
pub async fn submit_procurement(
    State(state): State<AppState>,
    current: CurrentUser,
    AppJson(request): AppJson<SubmitProcurementRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    request.validate()?;
    let requester_id = current.resolve_operator(request.requester_id)?;

    let id = ProcurementRepository::new(state.pool.clone())
        .submit(&request, requester_id)
        .await?;

    info!(
        procurement_id = id,
        requester_id = requester_id,
        quantity = request.quantity,
        "Procurement request submitted"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

/// Change a request's status.
///
/// PATCH /api/procurement/:id
pub async fn set_procurement_status(
    State(state): State<AppState>,
    current: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateProcurementStatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let previous = ProcurementRepository::new(state.pool.clone())
        .set_status(
            id,
            request.status,
            state.config.procurement.strict_transitions,
        )
        .await?;

    info!(
        procurement_id = id,
        from = %previous,
        to = %request.status,
        user_id = current.user_id,
        "Procurement status changed"
    );

    Ok(Json(SuccessResponse::ok()))
}

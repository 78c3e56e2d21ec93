//! Stock opname routes: condition checks.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::mutation::LedgerListQuery;
use domain::models::opname::RecordOpnameRequest;
use domain::models::{LedgerWriteResponse, OpnameEntry};
use persistence::repositories::OpnameRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, CurrentUser, OptionalIdempotencyKey};
use crate::middleware::metrics::{record_ledger_entry, record_ledger_replay};

const SCOPE: &str = "opname";

/// GET /api/opname?item_id=
pub async fn list_opname(
    State(state): State<AppState>,
    query: Result<Query<LedgerListQuery>, QueryRejection>,
) -> Result<Json<Vec<OpnameEntry>>, ApiError> {
    let Query(query) = query?;
    let entries = OpnameRepository::new(state.pool.clone())
        .list(query.item_id)
        .await?
        .into_iter()
        .map(OpnameEntry::from)
        .collect();

    Ok(Json(entries))
}

/// Record a condition check.
///
/// POST /api/opname
///
/// The prior condition is read from the asset inside the transaction.
pub async fn record_opname(
    State(state): State<AppState>,
    current: CurrentUser,
    OptionalIdempotencyKey(key): OptionalIdempotencyKey,
    AppJson(request): AppJson<RecordOpnameRequest>,
) -> Result<(StatusCode, Json<LedgerWriteResponse>), ApiError> {
    request.validate()?;
    let operator_id = current.resolve_operator(request.operator_id)?;
    let key_hash = key.map(|k| k.hash_for(SCOPE, current.user_id));

    let write = OpnameRepository::new(state.pool.clone())
        .record_check(
            request.item_id,
            request.condition_after,
            request.notes.as_deref(),
            operator_id,
            key_hash.as_deref(),
        )
        .await?;

    if write.replayed {
        record_ledger_replay(SCOPE);
    } else {
        record_ledger_entry(SCOPE, "api");
    }

    Ok((
        StatusCode::CREATED,
        Json(LedgerWriteResponse {
            success: true,
            id: write.entry_id,
            replayed: write.replayed,
        }),
    ))
}

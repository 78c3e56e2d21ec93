//! Mutation ledger routes: moving assets between rooms.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::mutation::{LedgerListQuery, RecordMutationRequest};
use domain::models::{LedgerWriteResponse, MutationEntry};
use persistence::repositories::MutationRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AppJson, CurrentUser, OptionalIdempotencyKey};
use crate::middleware::metrics::{record_ledger_entry, record_ledger_replay};

const SCOPE: &str = "mutation";

/// List mutation entries, newest first.
///
/// GET /api/mutations?item_id=
pub async fn list_mutations(
    State(state): State<AppState>,
    query: Result<Query<LedgerListQuery>, QueryRejection>,
) -> Result<Json<Vec<MutationEntry>>, ApiError> {
    let Query(query) = query?;
    let entries = MutationRepository::new(state.pool.clone())
        .list(query.item_id)
        .await?
        .into_iter()
        .map(MutationEntry::from)
        .collect();

    Ok(Json(entries))
}

/// Move an asset to another room.
///
/// POST /api/mutations
///
/// The source room is read from the asset inside the transaction; any value
/// the client sends for it is ignored.
pub async fn record_mutation(
    State(state): State<AppState>,
    current: CurrentUser,
    OptionalIdempotencyKey(key): OptionalIdempotencyKey,
    AppJson(request): AppJson<RecordMutationRequest>,
) -> Result<(StatusCode, Json<LedgerWriteResponse>), ApiError> {
    request.validate()?;
    let operator_id = current.resolve_operator(request.operator_id)?;
    let key_hash = key.map(|k| k.hash_for(SCOPE, current.user_id));

    let write = MutationRepository::new(state.pool.clone())
        .record_move(
            request.item_id,
            request.to_room_id,
            request.reason.as_deref(),
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

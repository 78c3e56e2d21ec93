//! Room routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::room::CreateRoomRequest;
use domain::models::{CreatedResponse, Room};
use persistence::repositories::RoomRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;

/// GET /api/rooms
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = RoomRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(Room::from)
        .collect();

    Ok(Json(rooms))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    request.validate()?;

    let id = RoomRepository::new(state.pool.clone())
        .create(&request)
        .await?;

    info!(room_id = id, code = %request.code, "Room created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(id))))
}

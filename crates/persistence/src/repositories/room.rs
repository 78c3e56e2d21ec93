//! Room repository for database operations.

use domain::models::room::CreateRoomRequest;
use sqlx::PgPool;

use crate::entities::RoomEntity;
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

/// Repository for the location directory.
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Creates a new RoomRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a room. A duplicate code is a validation failure.
    pub async fn create(&self, request: &CreateRoomRequest) -> Result<i64, LedgerError> {
        let timer = QueryTimer::new("create_room");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO rooms (code, name, pic_name, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(request.code.trim())
        .bind(request.name.trim())
        .bind(request.pic_name.as_deref())
        .bind(request.description.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }

    /// List all rooms ordered by id.
    pub async fn list(&self) -> Result<Vec<RoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_rooms");
        let result = sqlx::query_as::<_, RoomEntity>(
            r#"
            SELECT id, code, name, pic_name, description
            FROM rooms
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

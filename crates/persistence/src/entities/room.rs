//! Room entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the rooms table.
#[derive(Debug, Clone, FromRow)]
pub struct RoomEntity {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub pic_name: Option<String>,
    pub description: Option<String>,
}

impl From<RoomEntity> for domain::models::Room {
    fn from(entity: RoomEntity) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            name: entity.name,
            pic_name: entity.pic_name,
            description: entity.description,
        }
    }
}

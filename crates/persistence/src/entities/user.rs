//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::UserRole;
use sqlx::FromRow;

/// Database enum for user_role that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRoleDb {
    Admin,
    Operator,
    User,
}

impl From<UserRoleDb> for UserRole {
    fn from(db_role: UserRoleDb) -> Self {
        match db_role {
            UserRoleDb::Admin => UserRole::Admin,
            UserRoleDb::Operator => UserRole::Operator,
            UserRoleDb::User => UserRole::User,
        }
    }
}

impl From<UserRole> for UserRoleDb {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => UserRoleDb::Admin,
            UserRole::Operator => UserRoleDb::Operator,
            UserRole::User => UserRoleDb::User,
        }
    }
}

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRoleDb,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            name: entity.name,
            role: entity.role.into(),
            created_at: entity.created_at,
        }
    }
}

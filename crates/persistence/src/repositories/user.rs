//! User repository for database operations.

use domain::models::UserRole;
use sqlx::PgPool;

use crate::entities::{UserEntity, UserRoleDb};
use crate::error::LedgerError;
use crate::metrics::QueryTimer;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by username. Usernames are matched exactly.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_username");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, password_hash, name, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, password_hash, name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a user with an already hashed password.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
        role: UserRole,
    ) -> Result<UserEntity, LedgerError> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, name, role, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .bind(UserRoleDb::from(role))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?)
    }
}

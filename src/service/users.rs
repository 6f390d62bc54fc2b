//! Username resolution. Accounts themselves are managed elsewhere.

use crate::error::AppError;
use sqlx::PgPool;

pub struct UserRepo;

impl UserRepo {
    /// Resolve a username to its id. Unknown username -> `NotFound`.
    pub async fn id_by_username(pool: &PgPool, username: &str) -> Result<i32, AppError> {
        tracing::debug!(username = %username, "resolve user");
        let row: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        row.map(|(id,)| id)
            .ok_or_else(|| AppError::not_found(format!("User not found: {}", username)))
    }
}

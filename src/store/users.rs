use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Inserts a new user row.
///
/// Uniqueness is enforced by the `UNIQUE` constraint on `username`, not
/// by a prior existence check: two concurrent registrations of the same
/// name race harmlessly, and the loser's constraint violation is the
/// authoritative duplicate signal.
pub async fn insert(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash, first_name, last_name)
         VALUES ($1, $2, $3, $4)
         RETURNING id, username, password_hash, first_name, last_name",
    )
    .bind(username)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Conflict("Username already registered".into());
            }
        }
        AppError::from(e)
    })
}

/// Looks a user up by username. Used by login and by per-request
/// identity resolution.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, first_name, last_name
         FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

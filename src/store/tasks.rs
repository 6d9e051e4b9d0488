use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Task, TaskCreate, TaskPatch, TaskStatus};

/// Inserts a new task owned by `owner_id`. Status defaults to `New`
/// when the input leaves it unset.
pub async fn create(pool: &PgPool, owner_id: i32, input: TaskCreate) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, status, user_id)
         VALUES ($1, $2, $3, $4)
         RETURNING id, title, description, status, user_id",
    )
    .bind(input.title)
    .bind(input.description)
    .bind(input.status.unwrap_or_default())
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Fetches a single task, scoped to its owner. A task that exists but
/// belongs to someone else resolves to `None`, indistinguishable from a
/// missing row.
pub async fn find(pool: &PgPool, task_id: i32, owner_id: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, user_id
         FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Lists the owner's tasks in creation order, with offset pagination
/// and an optional status filter.
pub async fn list(
    pool: &PgPool,
    owner_id: i32,
    skip: i64,
    limit: i64,
    status: Option<TaskStatus>,
) -> Result<Vec<Task>, AppError> {
    let tasks = if let Some(status) = status {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id
             FROM tasks WHERE user_id = $1 AND status = $2
             ORDER BY id OFFSET $3 LIMIT $4",
        )
        .bind(owner_id)
        .bind(status)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, user_id
             FROM tasks WHERE user_id = $1
             ORDER BY id OFFSET $2 LIMIT $3",
        )
        .bind(owner_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(pool)
        .await?
    };

    Ok(tasks)
}

/// Applies a partial update to an owned task in one atomic statement.
///
/// `COALESCE` keeps the stored value for every field the patch leaves
/// absent. Returns `None` when the task does not exist or is not owned
/// by `owner_id`.
pub async fn update(
    pool: &PgPool,
    task_id: i32,
    owner_id: i32,
    patch: &TaskPatch,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             status = COALESCE($3, status)
         WHERE id = $4 AND user_id = $5
         RETURNING id, title, description, status, user_id",
    )
    .bind(patch.title.as_deref())
    .bind(patch.description.as_deref())
    .bind(patch.status)
    .bind(task_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Deletes an owned task. Returns `false` when nothing matched, which
/// covers both "no such task" and "not yours".
pub async fn delete(pool: &PgPool, task_id: i32, owner_id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

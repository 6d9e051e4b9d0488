use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TaskCreate, TaskPatch, TaskQuery, TaskStatus},
    store,
};

/// Retrieves the authenticated user's tasks.
///
/// Always scoped to the caller; there is no way to list another user's
/// tasks. Supports offset pagination and an optional status filter.
///
/// ## Query Parameters:
/// - `skip` (optional): Number of tasks to skip. Defaults to 0.
/// - `limit` (optional): Page size. Defaults to 10, capped at 100.
/// - `status` (optional): Filters tasks by status (`New`, `In Progress`,
///   `Completed`).
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, ordered by creation.
/// - `401 Unauthorized`: Missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query: web::Query<TaskQuery>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::list(
        &pool,
        user.0.id,
        query.skip(),
        query.limit(),
        query.status,
    )
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: Required, non-empty.
/// - `description` (optional).
/// - `status` (optional): Defaults to `New`.
///
/// ## Responses:
/// - `201 Created`: The created `Task`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `422 Unprocessable Entity`: Input validation failed.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskCreate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store::tasks::create(&pool, user.0.id, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task by id.
///
/// ## Responses:
/// - `200 OK`: The `Task`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: The task does not exist — or exists but belongs to
///   another user; the two cases are deliberately indistinguishable.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = store::tasks::find(&pool, task_id.into_inner(), user.0.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task.
///
/// Only fields present in the body are applied; absent fields keep their
/// stored values. Status values are validated against the enum, same as
/// on creation. Ownership is enforced inside the single UPDATE
/// statement.
///
/// ## Responses:
/// - `200 OK`: The updated `Task`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: Missing or not owned by the caller.
/// - `422 Unprocessable Entity`: Input validation failed.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    patch: web::Json<TaskPatch>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    patch.validate()?;

    let task = store::tasks::update(&pool, task_id.into_inner(), user.0.id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Marks a task as completed.
///
/// Shorthand for a status update fixed to `Completed`; goes through the
/// same ownership-gated update path as `PUT /tasks/{id}`.
#[put("/{id}/complete")]
pub async fn complete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let patch = TaskPatch {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };

    let task = store::tasks::update(&pool, task_id.into_inner(), user.0.id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task.
///
/// ## Responses:
/// - `200 OK`: `{"detail": "Task deleted"}`.
/// - `401 Unauthorized`: Missing or invalid bearer token.
/// - `404 Not Found`: Missing or not owned by the caller.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let deleted = store::tasks::delete(&pool, task_id.into_inner(), user.0.id).await?;

    if !deleted {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "detail": "Task deleted" })))
}

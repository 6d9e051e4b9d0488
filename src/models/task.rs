use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum; the JSON wire values are
/// `"New"`, `"In Progress"`, and `"Completed"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Task is yet to be started. The default for newly created tasks.
    New,
    /// Task is currently being worked on.
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    /// Task is done.
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::New
    }
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Identifier of the user who owns the task.
    pub user_id: i32,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description. Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Initial status. Defaults to `New` when omitted.
    pub status: Option<TaskStatus>,
}

/// Partial-update payload for a task.
///
/// Only fields present in the request body are applied; absent fields
/// leave the stored values untouched. Status values are validated
/// against the `TaskStatus` enum, the same as on creation.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskPatch {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Number of tasks to skip. Defaults to 0.
    pub skip: Option<i64>,
    /// Page size. Defaults to 10, capped at [`TaskQuery::MAX_LIMIT`].
    pub limit: Option<i64>,
    /// Filter tasks by status.
    pub status: Option<TaskStatus>,
}

impl TaskQuery {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Effective page size: defaulted and clamped so a single request
    /// cannot ask for an unbounded result set.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

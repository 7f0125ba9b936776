//! Task dependency model.

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

use crate::models::status::TaskStatus;

/// A dependency edge joined with the `{id, title, status}` of the task it
/// depends on. Loaded in one query, so the join columns are flattened here.
#[derive(Debug, Clone, FromRow)]
pub struct DependencyRow {
    pub id: DbId,
    pub task_id: DbId,
    pub depends_on_task_id: DbId,
    pub created_at: Timestamp,
    pub depends_on_title: String,
    pub depends_on_status: TaskStatus,
}

/// The depended-on task as embedded in responses.
#[derive(Debug, Clone, Serialize)]
pub struct DependsOnTask {
    pub id: DbId,
    pub title: String,
    pub status: TaskStatus,
}

/// A dependency edge as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDependency {
    pub id: DbId,
    pub task_id: DbId,
    pub depends_on_task_id: DbId,
    pub created_at: Timestamp,
    pub depends_on_task: DependsOnTask,
}

impl From<DependencyRow> for TaskDependency {
    fn from(row: DependencyRow) -> Self {
        Self {
            id: row.id,
            task_id: row.task_id,
            depends_on_task_id: row.depends_on_task_id,
            created_at: row.created_at,
            depends_on_task: DependsOnTask {
                id: row.depends_on_task_id,
                title: row.depends_on_title,
                status: row.depends_on_status,
            },
        }
    }
}

//! Response bodies shared across handlers.

use serde::Serialize;
use taskflow_core::pagination::Page;
use taskflow_db::models::project::ProjectListItem;
use taskflow_db::models::task::TaskListItem;

/// `GET /tasks` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub tasks: Vec<TaskListItem>,
    pub total: i64,
    pub has_more: bool,
}

impl From<Page<TaskListItem>> for TaskListResponse {
    fn from(page: Page<TaskListItem>) -> Self {
        Self {
            tasks: page.items,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// `GET /projects` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectListItem>,
    pub total: i64,
    pub has_more: bool,
}

impl From<Page<ProjectListItem>> for ProjectListResponse {
    fn from(page: Page<ProjectListItem>) -> Self {
        Self {
            projects: page.items,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

//! Project entity model, DTOs and response shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskflow_core::filters::bool_filter;
use taskflow_core::pagination::PageWindow;
use taskflow_core::patch;
use taskflow_core::types::{DbId, Timestamp};

use crate::models::project_member::MemberWithUser;
use crate::models::status::TaskStatus;
use crate::models::user::UserSummary;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_archived: bool,
    pub is_public: bool,
    pub owner_id: DbId,
    pub parent_id: Option<DbId>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The `{id, name, color, icon}` projection embedded in tasks.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// DTO for creating a project. The owner comes from the caller identity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_public: Option<bool>,
    pub parent_id: Option<DbId>,
}

/// DTO for partially updating a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub icon: Option<Option<String>>,
    pub is_archived: Option<bool>,
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub parent_id: Option<Option<DbId>>,
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Raw `GET /projects` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub include_archived: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Typed project predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Archived projects are excluded unless this is set.
    pub include_archived: bool,
}

impl ProjectFilter {
    pub fn from_params(params: &ProjectListParams) -> (Self, PageWindow) {
        let filter = Self {
            include_archived: bool_filter(params.include_archived.as_deref()).unwrap_or(false),
        };
        let window = PageWindow::from_raw(params.limit.as_deref(), params.offset.as_deref());
        (filter, window)
    }
}

// ---------------------------------------------------------------------------
// Aggregates and response shapes
// ---------------------------------------------------------------------------

/// Non-archived task and member counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectCounts {
    pub tasks: i64,
    pub members: i64,
}

/// Per-status breakdown of a project's non-archived tasks. Statuses with no
/// tasks are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub todo: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

impl TaskStats {
    /// Fold `(status, count)` group rows into a zero-filled breakdown.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (TaskStatus, i64)>,
    {
        let mut stats = Self::default();
        for (status, count) in counts {
            match status {
                TaskStatus::Todo => stats.todo += count,
                TaskStatus::InProgress => stats.in_progress += count,
                TaskStatus::Completed => stats.completed += count,
                TaskStatus::Cancelled => stats.cancelled += count,
            }
            stats.total += count;
        }
        stats
    }
}

/// A project with its owner and counts (`POST /projects` response).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithOwner {
    #[serde(flatten)]
    pub project: Project,
    pub owner: Option<UserSummary>,
    #[serde(rename = "_count")]
    pub counts: ProjectCounts,
}

/// One entry of `GET /projects`, also returned by `GET /projects/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub owner: Option<UserSummary>,
    pub members: Vec<MemberWithUser>,
    #[serde(rename = "_count")]
    pub counts: ProjectCounts,
    pub task_stats: TaskStats,
}

//! Task entity model, DTOs, list filter and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use taskflow_core::filters::{
    bool_filter, date_from_filter, date_to_filter, id_filter, list_filter, minutes_filter,
    parsed_list_filter, search_pattern,
};
use taskflow_core::pagination::PageWindow;
use taskflow_core::patch;
use taskflow_core::types::{DbId, Minutes, Timestamp};

use crate::models::attachment::Attachment;
use crate::models::comment::CommentWithAuthor;
use crate::models::dependency::TaskDependency;
use crate::models::project::ProjectSummary;
use crate::models::reminder::Reminder;
use crate::models::status::{TaskPriority, TaskStatus};
use crate::models::time_entry::{FocusSession, TimeEntry};
use crate::models::user::UserSummary;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub start_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub estimated_time: Option<Minutes>,
    pub actual_time: Option<Minutes>,
    pub tags: Vec<String>,
    pub custom_fields: Option<Value>,
    pub is_recurring: bool,
    pub recurring_rule: Option<String>,
    pub location: Option<String>,
    pub is_archived: bool,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub created_by_id: DbId,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task.
///
/// `title` defaults to empty so a missing title surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "patch::timestamp")]
    pub due_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "patch::timestamp")]
    pub start_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "patch::minutes")]
    pub estimated_time: Option<Minutes>,
    pub project_id: Option<DbId>,
    pub assignee_id: Option<DbId>,
    pub parent_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    pub custom_fields: Option<Value>,
    /// Defaults to `false` if omitted.
    pub is_recurring: Option<bool>,
    pub recurring_rule: Option<String>,
    pub location: Option<String>,
}

/// DTO for partially updating a task.
///
/// Plain `Option` fields are left unchanged when absent. `Option<Option<_>>`
/// fields additionally distinguish an explicit `null` (clear the column).
/// `completedAt` is never derived from `status`; callers set both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub notes: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "patch::nullable_timestamp")]
    pub due_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "patch::nullable_timestamp")]
    pub start_date: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "patch::nullable_timestamp")]
    pub completed_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "patch::nullable_minutes")]
    pub estimated_time: Option<Option<Minutes>>,
    #[serde(default, deserialize_with = "patch::nullable_minutes")]
    pub actual_time: Option<Option<Minutes>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub project_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub assignee_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub custom_fields: Option<Option<Value>>,
    pub is_recurring: Option<bool>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub recurring_rule: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::double_option")]
    pub location: Option<Option<String>>,
    pub is_archived: Option<bool>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Raw `GET /tasks` query string. Every value is kept as text and
/// interpreted leniently by [`TaskFilter::from_params`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub project_id: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee_id: Option<String>,
    pub search: Option<String>,
    pub tags: Option<String>,
    pub due_from: Option<String>,
    pub due_to: Option<String>,
    pub estimated_min: Option<String>,
    pub estimated_max: Option<String>,
    pub has_comments: Option<String>,
    pub has_attachments: Option<String>,
    pub overdue: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Typed task predicate. `None` fields are not applied; the rest are ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub project_id: Option<DbId>,
    pub statuses: Option<Vec<TaskStatus>>,
    pub priorities: Option<Vec<TaskPriority>>,
    pub assignee_id: Option<DbId>,
    /// Ready-to-bind `ILIKE` pattern matched against title, description, notes.
    pub search: Option<String>,
    /// Matches when the task's tags intersect this set.
    pub tags: Option<Vec<String>>,
    pub due_from: Option<Timestamp>,
    pub due_to: Option<Timestamp>,
    pub estimated_min: Option<Minutes>,
    pub estimated_max: Option<Minutes>,
    pub has_comments: Option<bool>,
    pub has_attachments: Option<bool>,
    /// Only `Some(true)` restricts; `false` is treated as not set.
    pub overdue: bool,
}

impl TaskFilter {
    /// Interpret raw query values. Unknown values are dropped, never errors.
    pub fn from_params(params: &TaskListParams) -> (Self, PageWindow) {
        let filter = Self {
            project_id: id_filter(params.project_id.as_deref()),
            statuses: parsed_list_filter(params.status.as_deref(), TaskStatus::parse),
            priorities: parsed_list_filter(params.priority.as_deref(), TaskPriority::parse),
            assignee_id: id_filter(params.assignee_id.as_deref()),
            search: search_pattern(params.search.as_deref()),
            tags: list_filter(params.tags.as_deref()),
            due_from: date_from_filter(params.due_from.as_deref()),
            due_to: date_to_filter(params.due_to.as_deref()),
            estimated_min: minutes_filter(params.estimated_min.as_deref()),
            estimated_max: minutes_filter(params.estimated_max.as_deref()),
            has_comments: bool_filter(params.has_comments.as_deref()),
            has_attachments: bool_filter(params.has_attachments.as_deref()),
            overdue: bool_filter(params.overdue.as_deref()).unwrap_or(false),
        };
        let window = PageWindow::from_raw(params.limit.as_deref(), params.offset.as_deref());
        (filter, window)
    }

    /// Status filter as text, for binding against `status::text`.
    pub fn status_texts(&self) -> Option<Vec<String>> {
        self.statuses
            .as_ref()
            .map(|s| s.iter().map(|v| v.as_str().to_string()).collect())
    }

    /// Priority filter as text, for binding against `priority::text`.
    pub fn priority_texts(&self) -> Option<Vec<String>> {
        self.priorities
            .as_ref()
            .map(|p| p.iter().map(|v| v.as_str().to_string()).collect())
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A task with its project, assignee and creator summaries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithRelations {
    #[serde(flatten)]
    pub task: Task,
    pub project: Option<ProjectSummary>,
    pub assignee: Option<UserSummary>,
    pub created_by: Option<UserSummary>,
}

/// A subtask with its assignee.
#[derive(Debug, Clone, Serialize)]
pub struct ChildTask {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<UserSummary>,
}

/// Related-row counts shown in list views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub comments: i64,
    pub attachments: i64,
    pub children: i64,
}

/// One entry of `GET /tasks`.
#[derive(Debug, Clone, Serialize)]
pub struct TaskListItem {
    #[serde(flatten)]
    pub task: TaskWithRelations,
    pub children: Vec<ChildTask>,
    pub dependencies: Vec<TaskDependency>,
    #[serde(rename = "_count")]
    pub counts: TaskCounts,
}

/// `GET /tasks/{id}`: the task with every related collection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: TaskWithRelations,
    pub children: Vec<ChildTask>,
    /// Oldest first.
    pub comments: Vec<CommentWithAuthor>,
    pub attachments: Vec<Attachment>,
    /// Newest first.
    pub time_entries: Vec<TimeEntry>,
    pub dependencies: Vec<TaskDependency>,
    pub reminders: Vec<Reminder>,
    /// Newest first.
    pub focus_sessions: Vec<FocusSession>,
}

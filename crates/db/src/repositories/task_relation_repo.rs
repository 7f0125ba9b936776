//! Loaders for a task's child records: subtasks, dependencies, comments,
//! attachments, time entries, focus sessions, and list-view counts.
//!
//! List views load relations for a whole page at once (`*_by_*_ids`) so a
//! page costs a fixed number of queries regardless of its size.

use std::collections::HashMap;

use sqlx::PgPool;
use taskflow_core::types::DbId;

use crate::models::attachment::Attachment;
use crate::models::comment::{Comment, CommentWithAuthor};
use crate::models::dependency::{DependencyRow, TaskDependency};
use crate::models::task::{ChildTask, Task, TaskCounts};
use crate::models::time_entry::{FocusSession, TimeEntry};
use crate::repositories::task_repo::COLUMNS as TASK_COLUMNS;
use crate::repositories::UserRepo;

/// Provides batch and single-task relation queries.
pub struct TaskRelationRepo;

impl TaskRelationRepo {
    /// Subtasks (with assignees) grouped by parent ID, oldest first.
    pub async fn children_by_parent_ids(
        pool: &PgPool,
        parent_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ChildTask>>, sqlx::Error> {
        if parent_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE parent_id = ANY($1)
             ORDER BY created_at ASC, id ASC"
        );
        let children = sqlx::query_as::<_, Task>(&query)
            .bind(parent_ids)
            .fetch_all(pool)
            .await?;

        let assignee_ids: Vec<DbId> = children.iter().filter_map(|t| t.assignee_id).collect();
        let users = UserRepo::summaries_by_ids(pool, &assignee_ids).await?;

        let mut grouped: HashMap<DbId, Vec<ChildTask>> = HashMap::new();
        for task in children {
            let Some(parent_id) = task.parent_id else {
                continue;
            };
            let assignee = task.assignee_id.and_then(|id| users.get(&id).cloned());
            grouped
                .entry(parent_id)
                .or_default()
                .push(ChildTask { task, assignee });
        }
        Ok(grouped)
    }

    /// Dependency edges (with the depended-on task's id/title/status) grouped
    /// by the dependent task's ID.
    pub async fn dependencies_by_task_ids(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TaskDependency>>, sqlx::Error> {
        if task_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, DependencyRow>(
            "SELECT d.id, d.task_id, d.depends_on_task_id, d.created_at,
                    t.title AS depends_on_title, t.status AS depends_on_status
             FROM task_dependencies d
             JOIN tasks t ON t.id = d.depends_on_task_id
             WHERE d.task_id = ANY($1)
             ORDER BY d.created_at ASC, d.id ASC",
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<TaskDependency>> = HashMap::new();
        for row in rows {
            grouped.entry(row.task_id).or_default().push(row.into());
        }
        Ok(grouped)
    }

    /// Comment, attachment and subtask counts per task. Tasks with nothing
    /// attached are absent from the map (treat as zero).
    pub async fn counts_by_task_ids(
        pool: &PgPool,
        task_ids: &[DbId],
    ) -> Result<HashMap<DbId, TaskCounts>, sqlx::Error> {
        if task_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, (DbId, i64, i64, i64)>(
            "SELECT t.id,
                    (SELECT COUNT(*) FROM comments c WHERE c.task_id = t.id),
                    (SELECT COUNT(*) FROM attachments a WHERE a.task_id = t.id),
                    (SELECT COUNT(*) FROM tasks ch WHERE ch.parent_id = t.id)
             FROM tasks t
             WHERE t.id = ANY($1)",
        )
        .bind(task_ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, comments, attachments, children)| {
                (
                    id,
                    TaskCounts {
                        comments,
                        attachments,
                        children,
                    },
                )
            })
            .collect())
    }

    /// A task's comments with authors, oldest first.
    pub async fn comments_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, task_id, author_id, content, created_at, updated_at
             FROM comments
             WHERE task_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        let author_ids: Vec<DbId> = comments.iter().map(|c| c.author_id).collect();
        let authors = UserRepo::summaries_by_ids(pool, &author_ids).await?;

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author_id).cloned();
                CommentWithAuthor { comment, author }
            })
            .collect())
    }

    /// A task's attachments, oldest first.
    pub async fn attachments_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        sqlx::query_as::<_, Attachment>(
            "SELECT id, task_id, file_name, file_url, file_size, mime_type, created_at
             FROM attachments
             WHERE task_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// A task's time entries, newest start first.
    pub async fn time_entries_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        sqlx::query_as::<_, TimeEntry>(
            "SELECT id, task_id, user_id, description, start_time, end_time, duration, created_at
             FROM time_entries
             WHERE task_id = $1
             ORDER BY start_time DESC, id DESC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// A task's focus sessions, newest start first.
    pub async fn focus_sessions_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<FocusSession>, sqlx::Error> {
        sqlx::query_as::<_, FocusSession>(
            "SELECT id, task_id, user_id, start_time, end_time, duration, completed, created_at
             FROM focus_sessions
             WHERE task_id = $1
             ORDER BY start_time DESC, id DESC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}

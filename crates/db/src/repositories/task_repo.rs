//! Repository for the `tasks` table.
//!
//! The list predicate is a fixed statement with one nullable parameter per
//! filter (`$n IS NULL OR ...`), so every filter combination shares a single
//! prepared query and user input is only ever bound, never interpolated.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use taskflow_core::pagination::PageWindow;
use taskflow_core::reminders::due_reminder;
use taskflow_core::types::DbId;

use crate::models::task::{
    CreateTask, Task, TaskDetail, TaskFilter, TaskListItem, TaskWithRelations, UpdateTask,
};
use crate::repositories::{ProjectRepo, ReminderRepo, TaskRelationRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
pub const COLUMNS: &str = "id, title, description, notes, status, priority, due_date, \
                           start_date, completed_at, estimated_time, actual_time, tags, \
                           custom_fields, is_recurring, recurring_rule, location, is_archived, \
                           project_id, assignee_id, created_by_id, parent_id, created_at, \
                           updated_at";

/// Shared by `list` and `count`; binds `$1..$13` in [`bind_filter`] order.
const LIST_PREDICATE: &str = "\
    ($1::BIGINT IS NULL OR project_id = $1) \
    AND ($2::TEXT[] IS NULL OR status::TEXT = ANY($2)) \
    AND ($3::TEXT[] IS NULL OR priority::TEXT = ANY($3)) \
    AND ($4::BIGINT IS NULL OR assignee_id = $4) \
    AND ($5::TEXT IS NULL OR title ILIKE $5 OR description ILIKE $5 OR notes ILIKE $5) \
    AND ($6::TEXT[] IS NULL OR tags && $6) \
    AND ($7::TIMESTAMPTZ IS NULL OR due_date >= $7) \
    AND ($8::TIMESTAMPTZ IS NULL OR due_date <= $8) \
    AND ($9::INTEGER IS NULL OR estimated_time >= $9) \
    AND ($10::INTEGER IS NULL OR estimated_time <= $10) \
    AND ($11::BOOLEAN IS NULL \
         OR EXISTS (SELECT 1 FROM comments c WHERE c.task_id = tasks.id) = $11) \
    AND ($12::BOOLEAN IS NULL \
         OR EXISTS (SELECT 1 FROM attachments a WHERE a.task_id = tasks.id) = $12) \
    AND (NOT $13::BOOLEAN \
         OR (due_date < NOW() AND status NOT IN ('completed', 'cancelled')))";

/// Urgent first, then soonest due (undated last), then newest.
const LIST_ORDER: &str = "priority DESC, due_date ASC NULLS LAST, created_at DESC, id DESC";

type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

fn bind_filter<'q, O>(query: PgQueryAs<'q, O>, filter: &'q TaskFilter) -> PgQueryAs<'q, O> {
    query
        .bind(filter.project_id)
        .bind(filter.status_texts())
        .bind(filter.priority_texts())
        .bind(filter.assignee_id)
        .bind(filter.search.as_deref())
        .bind(filter.tags.as_deref())
        .bind(filter.due_from)
        .bind(filter.due_to)
        .bind(filter.estimated_min)
        .bind(filter.estimated_max)
        .bind(filter.has_comments)
        .bind(filter.has_attachments)
        .bind(filter.overdue)
}

/// Provides CRUD operations and list queries for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task created by `created_by_id`.
    ///
    /// When the task has a due date, its reminder is inserted in the same
    /// transaction. `input.title` is stored as given; validate it first.
    pub async fn create(
        pool: &PgPool,
        created_by_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tasks
                (title, description, notes, priority, due_date, start_date, estimated_time,
                 project_id, assignee_id, parent_id, tags, custom_fields, is_recurring,
                 recurring_rule, location, created_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.notes)
            .bind(input.priority.unwrap_or_default())
            .bind(input.due_date)
            .bind(input.start_date)
            .bind(input.estimated_time)
            .bind(input.project_id)
            .bind(input.assignee_id)
            .bind(input.parent_id)
            .bind(input.tags.clone().unwrap_or_default())
            .bind(&input.custom_fields)
            .bind(input.is_recurring.unwrap_or(false))
            .bind(&input.recurring_rule)
            .bind(&input.location)
            .bind(created_by_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(due) = task.due_date {
            let reminder = due_reminder(&task.title, due);
            ReminderRepo::create(&mut *tx, task.id, &reminder).await?;
            tracing::debug!(task_id = task.id, trigger_at = %reminder.trigger_at, "Due reminder scheduled");
        }

        tx.commit().await?;
        Ok(task)
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of tasks matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &TaskFilter,
        window: PageWindow,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE {LIST_PREDICATE}
             ORDER BY {LIST_ORDER}
             LIMIT $14 OFFSET $15"
        );
        bind_filter(sqlx::query_as::<_, Task>(&query), filter)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(pool)
            .await
    }

    /// Number of tasks matching `filter`, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &TaskFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM tasks WHERE {LIST_PREDICATE}");
        let (total,) = bind_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    /// Update a task. Absent fields are left unchanged; nullable fields
    /// supplied as `null` are cleared. `completed_at` only changes when the
    /// caller sends it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                notes = CASE WHEN $5 THEN $6 ELSE notes END,
                status = COALESCE($7, status),
                priority = COALESCE($8, priority),
                due_date = CASE WHEN $9 THEN $10 ELSE due_date END,
                start_date = CASE WHEN $11 THEN $12 ELSE start_date END,
                completed_at = CASE WHEN $13 THEN $14 ELSE completed_at END,
                estimated_time = CASE WHEN $15 THEN $16 ELSE estimated_time END,
                actual_time = CASE WHEN $17 THEN $18 ELSE actual_time END,
                project_id = CASE WHEN $19 THEN $20 ELSE project_id END,
                assignee_id = CASE WHEN $21 THEN $22 ELSE assignee_id END,
                tags = CASE WHEN $23 THEN COALESCE($24, '{{}}') ELSE tags END,
                custom_fields = CASE WHEN $25 THEN $26 ELSE custom_fields END,
                is_recurring = COALESCE($27, is_recurring),
                recurring_rule = CASE WHEN $28 THEN $29 ELSE recurring_rule END,
                location = CASE WHEN $30 THEN $31 ELSE location END,
                is_archived = COALESCE($32, is_archived)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .bind(input.status)
            .bind(input.priority)
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .bind(input.start_date.is_some())
            .bind(input.start_date.flatten())
            .bind(input.completed_at.is_some())
            .bind(input.completed_at.flatten())
            .bind(input.estimated_time.is_some())
            .bind(input.estimated_time.flatten())
            .bind(input.actual_time.is_some())
            .bind(input.actual_time.flatten())
            .bind(input.project_id.is_some())
            .bind(input.project_id.flatten())
            .bind(input.assignee_id.is_some())
            .bind(input.assignee_id.flatten())
            .bind(input.tags.is_some())
            .bind(input.tags.clone().flatten())
            .bind(input.custom_fields.is_some())
            .bind(input.custom_fields.clone().flatten())
            .bind(input.is_recurring)
            .bind(input.recurring_rule.is_some())
            .bind(input.recurring_rule.clone().flatten())
            .bind(input.location.is_some())
            .bind(input.location.clone().flatten())
            .bind(input.is_archived)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task. Subtasks are kept and detached; child
    /// records cascade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Response assembly
    // -----------------------------------------------------------------------

    /// Attach project, assignee and creator summaries, preserving order.
    pub async fn with_relations(
        pool: &PgPool,
        tasks: Vec<Task>,
    ) -> Result<Vec<TaskWithRelations>, sqlx::Error> {
        let project_ids: Vec<DbId> = tasks.iter().filter_map(|t| t.project_id).collect();
        let user_ids: Vec<DbId> = tasks
            .iter()
            .flat_map(|t| t.assignee_id.into_iter().chain([t.created_by_id]))
            .collect();

        let projects = ProjectRepo::summaries_by_ids(pool, &project_ids).await?;
        let users = UserRepo::summaries_by_ids(pool, &user_ids).await?;

        Ok(tasks
            .into_iter()
            .map(|task| TaskWithRelations {
                project: task.project_id.and_then(|id| projects.get(&id).cloned()),
                assignee: task.assignee_id.and_then(|id| users.get(&id).cloned()),
                created_by: users.get(&task.created_by_id).cloned(),
                task,
            })
            .collect())
    }

    /// Single-task variant of [`Self::with_relations`].
    pub async fn with_relations_one(
        pool: &PgPool,
        task: Task,
    ) -> Result<TaskWithRelations, sqlx::Error> {
        let mut rows = Self::with_relations(pool, vec![task]).await?;
        rows.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Build list entries for a page of tasks: summaries, subtasks,
    /// dependencies and `_count`.
    pub async fn list_items(
        pool: &PgPool,
        tasks: Vec<Task>,
    ) -> Result<Vec<TaskListItem>, sqlx::Error> {
        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();

        let mut children = TaskRelationRepo::children_by_parent_ids(pool, &ids).await?;
        let mut dependencies = TaskRelationRepo::dependencies_by_task_ids(pool, &ids).await?;
        let mut counts = TaskRelationRepo::counts_by_task_ids(pool, &ids).await?;

        Ok(Self::with_relations(pool, tasks)
            .await?
            .into_iter()
            .map(|task| {
                let id = task.task.id;
                TaskListItem {
                    children: children.remove(&id).unwrap_or_default(),
                    dependencies: dependencies.remove(&id).unwrap_or_default(),
                    counts: counts.remove(&id).unwrap_or_default(),
                    task,
                }
            })
            .collect())
    }

    /// A task with every related collection, or `None` if absent.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<TaskDetail>, sqlx::Error> {
        let Some(task) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let task = Self::with_relations_one(pool, task).await?;

        let children = TaskRelationRepo::children_by_parent_ids(pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        let dependencies = TaskRelationRepo::dependencies_by_task_ids(pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(Some(TaskDetail {
            task,
            children,
            comments: TaskRelationRepo::comments_for_task(pool, id).await?,
            attachments: TaskRelationRepo::attachments_for_task(pool, id).await?,
            time_entries: TaskRelationRepo::time_entries_for_task(pool, id).await?,
            dependencies,
            reminders: ReminderRepo::list_for_task(pool, id).await?,
            focus_sessions: TaskRelationRepo::focus_sessions_for_task(pool, id).await?,
        }))
    }
}

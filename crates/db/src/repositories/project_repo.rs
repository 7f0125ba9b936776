//! Repository for the `projects` table, plus the aggregates shown alongside
//! projects (owner, members, task counts and per-status task stats).

use std::collections::HashMap;

use sqlx::PgPool;
use taskflow_core::pagination::PageWindow;
use taskflow_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectCounts, ProjectFilter, ProjectListItem, ProjectSummary,
    ProjectWithOwner, TaskStats, UpdateProject,
};
use crate::models::project_member::ROLE_OWNER;
use crate::models::status::TaskStatus;
use crate::repositories::{ProjectMemberRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, color, icon, is_archived, is_public, \
                       owner_id, parent_id, sort_order, created_at, updated_at";

/// Shared by `list` and `count`. `$1` is `include_archived`.
const LIST_PREDICATE: &str = "($1 OR is_archived = FALSE)";

/// Provides CRUD operations and aggregates for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project owned by `owner_id` and enrol the owner as a member
    /// with role `owner`, in one transaction.
    ///
    /// `sort_order` is one past the owner's current maximum (first project
    /// gets 1). `input.name` is stored as given; validate it first.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects
                (name, description, color, icon, is_public, parent_id, owner_id, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE), $6, $7,
                (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM projects WHERE owner_id = $7))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .bind(input.is_public)
            .bind(input.parent_id)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        ProjectMemberRepo::add(&mut *tx, project.id, owner_id, ROLE_OWNER).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of projects, manual order first, newest first within ties.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        window: PageWindow,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE {LIST_PREDICATE}
             ORDER BY sort_order ASC, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.include_archived)
            .bind(window.limit)
            .bind(window.offset)
            .fetch_all(pool)
            .await
    }

    /// Number of projects matching `filter`, ignoring pagination.
    pub async fn count(pool: &PgPool, filter: &ProjectFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM projects WHERE {LIST_PREDICATE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.include_archived)
            .fetch_one(pool)
            .await
    }

    /// Update a project. Absent fields are left unchanged; nullable fields
    /// supplied as `null` are cleared.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                color = CASE WHEN $5 THEN $6 ELSE color END,
                icon = CASE WHEN $7 THEN $8 ELSE icon END,
                is_archived = COALESCE($9, is_archived),
                is_public = COALESCE($10, is_public),
                parent_id = CASE WHEN $11 THEN $12 ELSE parent_id END,
                sort_order = COALESCE($13, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.color.is_some())
            .bind(input.color.clone().flatten())
            .bind(input.icon.is_some())
            .bind(input.icon.clone().flatten())
            .bind(input.is_archived)
            .bind(input.is_public)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Whether `candidate` is `root` or one of its descendants through
    /// `parent_id` links.
    pub async fn is_in_subtree(
        pool: &PgPool,
        root: DbId,
        candidate: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "WITH RECURSIVE subtree(id) AS (
                SELECT id FROM projects WHERE id = $1
                UNION
                SELECT p.id FROM projects p JOIN subtree s ON p.parent_id = s.id
             )
             SELECT EXISTS (SELECT 1 FROM subtree WHERE id = $2)",
        )
        .bind(root)
        .bind(candidate)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete a project. Its tasks are kept and lose their
    /// project; memberships are removed. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Batch lookups
    // -----------------------------------------------------------------------

    /// `{id, name, color, icon}` projections keyed by ID.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, ProjectSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, name, color, icon FROM projects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|p| (p.id, p)).collect())
    }

    /// Non-archived task counts and member counts keyed by project ID.
    /// Every requested ID that exists is present.
    pub async fn counts_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, ProjectCounts>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, (DbId, i64, i64)>(
            "SELECT p.id,
                    (SELECT COUNT(*) FROM tasks t
                     WHERE t.project_id = p.id AND t.is_archived = FALSE),
                    (SELECT COUNT(*) FROM project_members m WHERE m.project_id = p.id)
             FROM projects p
             WHERE p.id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, tasks, members)| (id, ProjectCounts { tasks, members }))
            .collect())
    }

    /// Per-status breakdown of non-archived tasks keyed by project ID.
    /// Projects without tasks are absent (treat as all-zero).
    pub async fn task_stats_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, TaskStats>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, (DbId, TaskStatus, i64)>(
            "SELECT project_id, status, COUNT(*)
             FROM tasks
             WHERE project_id = ANY($1) AND is_archived = FALSE
             GROUP BY project_id, status",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Vec<(TaskStatus, i64)>> = HashMap::new();
        for (project_id, status, count) in rows {
            grouped.entry(project_id).or_default().push((status, count));
        }
        Ok(grouped
            .into_iter()
            .map(|(id, counts)| (id, TaskStats::from_counts(counts)))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Response assembly
    // -----------------------------------------------------------------------

    /// Attach owner summary and counts (create response).
    pub async fn with_owner(
        pool: &PgPool,
        project: Project,
    ) -> Result<ProjectWithOwner, sqlx::Error> {
        let owner = UserRepo::find_summary(pool, project.owner_id).await?;
        let counts = Self::counts_by_ids(pool, &[project.id])
            .await?
            .remove(&project.id)
            .unwrap_or_default();
        Ok(ProjectWithOwner {
            project,
            owner,
            counts,
        })
    }

    /// Attach owner, members, counts and task stats to a page of projects,
    /// preserving order.
    pub async fn list_items(
        pool: &PgPool,
        projects: Vec<Project>,
    ) -> Result<Vec<ProjectListItem>, sqlx::Error> {
        let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
        let owner_ids: Vec<DbId> = projects.iter().map(|p| p.owner_id).collect();

        let owners = UserRepo::summaries_by_ids(pool, &owner_ids).await?;
        let mut members = ProjectMemberRepo::members_by_project_ids(pool, &ids).await?;
        let mut counts = Self::counts_by_ids(pool, &ids).await?;
        let mut stats = Self::task_stats_by_ids(pool, &ids).await?;

        Ok(projects
            .into_iter()
            .map(|project| {
                let id = project.id;
                ProjectListItem {
                    owner: owners.get(&project.owner_id).cloned(),
                    members: members.remove(&id).unwrap_or_default(),
                    counts: counts.remove(&id).unwrap_or_default(),
                    task_stats: stats.remove(&id).unwrap_or_default(),
                    project,
                }
            })
            .collect())
    }

    /// A single project in list-item shape, or `None` if absent.
    pub async fn find_with_details(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectListItem>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::list_items(pool, vec![project]).await?.pop())
    }
}

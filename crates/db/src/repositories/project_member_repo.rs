//! Repository for the `project_members` table.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use taskflow_core::types::DbId;

use crate::models::project_member::{MemberWithUser, ProjectMember};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, project_id, user_id, role, joined_at";

/// Provides membership inserts and batch lookups.
pub struct ProjectMemberRepo;

impl ProjectMemberRepo {
    /// Grant `user_id` the given role on a project.
    pub async fn add(
        conn: &mut PgConnection,
        project_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(conn)
            .await
    }

    /// Members (with user summaries) grouped by project ID, earliest joined first.
    pub async fn members_by_project_ids(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<MemberWithUser>>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM project_members
             WHERE project_id = ANY($1)
             ORDER BY joined_at ASC, id ASC"
        );
        let members = sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await?;

        let user_ids: Vec<DbId> = members.iter().map(|m| m.user_id).collect();
        let users = UserRepo::summaries_by_ids(pool, &user_ids).await?;

        let mut grouped: HashMap<DbId, Vec<MemberWithUser>> = HashMap::new();
        for member in members {
            let user = users.get(&member.user_id).cloned();
            grouped
                .entry(member.project_id)
                .or_default()
                .push(MemberWithUser { member, user });
        }
        Ok(grouped)
    }
}

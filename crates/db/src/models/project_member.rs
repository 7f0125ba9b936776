//! Project membership model.

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

use crate::models::user::UserSummary;

/// Role granted to the creator of a project.
pub const ROLE_OWNER: &str = "owner";

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub joined_at: Timestamp,
}

/// A membership with the member's user summary embedded.
#[derive(Debug, Clone, Serialize)]
pub struct MemberWithUser {
    #[serde(flatten)]
    pub member: ProjectMember,
    pub user: Option<UserSummary>,
}

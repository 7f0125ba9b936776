//! User references. Users are never mutated by this service.

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::DbId;

/// The `{id, name, email, avatar}` projection embedded wherever a task or
/// project references a user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub avatar: Option<String>,
}

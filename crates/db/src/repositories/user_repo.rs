//! Read access to the `users` table.

use std::collections::HashMap;

use sqlx::PgPool;
use taskflow_core::types::DbId;

use crate::models::user::UserSummary;

const SUMMARY_COLUMNS: &str = "id, name, email, avatar";

/// Looks up user summaries for embedding in task and project responses.
pub struct UserRepo;

impl UserRepo {
    /// Find one user summary by ID.
    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<UserSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batch-load summaries for a set of user IDs, keyed by ID.
    ///
    /// Duplicate IDs are fine; missing IDs are simply absent from the map.
    pub async fn summaries_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, UserSummary>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM users WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, UserSummary>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|u| (u.id, u)).collect())
    }
}

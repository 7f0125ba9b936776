//! Time tracking models (read-only here).

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::{DbId, Minutes, Timestamp};

/// A row from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: Option<DbId>,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duration: Option<Minutes>,
    pub created_at: Timestamp,
}

/// A row from the `focus_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: Option<DbId>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duration: Option<Minutes>,
    pub completed: bool,
    pub created_at: Timestamp,
}

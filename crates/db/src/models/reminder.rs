//! Reminder model.

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

/// A row from the `reminders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: DbId,
    pub task_id: DbId,
    pub trigger_at: Timestamp,
    pub message: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub reminder_type: String,
    pub is_sent: bool,
    pub created_at: Timestamp,
}

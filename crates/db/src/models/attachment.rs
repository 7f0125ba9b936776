//! Task attachment model (read-only here).

use serde::Serialize;
use sqlx::FromRow;
use taskflow_core::types::{DbId, Timestamp};

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: DbId,
    pub task_id: DbId,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: Timestamp,
}

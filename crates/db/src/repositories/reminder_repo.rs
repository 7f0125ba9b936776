//! Repository for the `reminders` table.

use sqlx::{PgConnection, PgPool};
use taskflow_core::reminders::DueReminder;
use taskflow_core::types::DbId;

use crate::models::reminder::Reminder;

const COLUMNS: &str = "id, task_id, trigger_at, message, type, is_sent, created_at";

/// Provides reminder inserts and lookups.
pub struct ReminderRepo;

impl ReminderRepo {
    /// Insert a reminder on an existing connection (usually the transaction
    /// that created the task).
    pub async fn create(
        conn: &mut PgConnection,
        task_id: DbId,
        reminder: &DueReminder,
    ) -> Result<Reminder, sqlx::Error> {
        let query = format!(
            "INSERT INTO reminders (task_id, trigger_at, message, type)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(task_id)
            .bind(reminder.trigger_at)
            .bind(&reminder.message)
            .bind(reminder.reminder_type)
            .fetch_one(conn)
            .await
    }

    /// List a task's reminders, earliest trigger first.
    pub async fn list_for_task(pool: &PgPool, task_id: DbId) -> Result<Vec<Reminder>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reminders WHERE task_id = $1 ORDER BY trigger_at ASC, id ASC"
        );
        sqlx::query_as::<_, Reminder>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }
}

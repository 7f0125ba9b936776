//! Reminder derivation for tasks with a due date.

use chrono::Duration;

use crate::types::Timestamp;

/// How far ahead of the due date the automatic reminder fires.
pub const DUE_REMINDER_LEAD_HOURS: i64 = 24;

/// Reminder type recorded for the automatic due-date reminder.
pub const REMINDER_TYPE_NOTIFICATION: &str = "notification";

/// The reminder that accompanies a newly created task with a due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub trigger_at: Timestamp,
    pub message: String,
    pub reminder_type: &'static str,
}

/// Compute the automatic reminder for a task due at `due`.
pub fn due_reminder(title: &str, due: Timestamp) -> DueReminder {
    DueReminder {
        trigger_at: due - Duration::hours(DUE_REMINDER_LEAD_HOURS),
        message: format!("Task \"{title}\" is due tomorrow"),
        reminder_type: REMINDER_TYPE_NOTIFICATION,
    }
}

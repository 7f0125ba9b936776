//! Input validation for task and project writes.

use crate::error::CoreError;
use crate::types::Minutes;

/// Maximum length of a task title or project name, in characters.
pub const MAX_TITLE_LENGTH: usize = 500;

fn required_text(value: &str, missing: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(missing.to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a task title, returning it trimmed.
pub fn validate_task_title(title: &str) -> Result<String, CoreError> {
    required_text(title, "Title is required", "Title")
}

/// Validate a project name, returning it trimmed.
pub fn validate_project_name(name: &str) -> Result<String, CoreError> {
    required_text(name, "Project name is required", "Project name")
}

/// Durations on tasks must be positive when present.
pub fn validate_minutes(field: &str, value: Option<Minutes>) -> Result<(), CoreError> {
    match value {
        Some(m) if m <= 0 => Err(CoreError::Validation(format!(
            "{field} must be a positive number of minutes"
        ))),
        _ => Ok(()),
    }
}

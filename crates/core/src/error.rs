//! Domain error shared by every crate in the workspace.

use crate::types::DbId;

/// Failures raised by task/project operations before or after they touch the
/// store. The HTTP layer maps each variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Operation targeted an identifier that does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Missing or malformed input (e.g. empty task title).
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}

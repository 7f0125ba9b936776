use std::sync::Arc;

use taskflow_assist::AssistGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted-model gateway for `/ai/suggestions`.
    pub assist: AssistGateway,
}

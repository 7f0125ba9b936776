//! Handler for the `/ai/suggestions` endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// Request body: a request `type` and its free-form `data` payload.
#[derive(Debug, Deserialize)]
pub struct AssistRequest {
    /// Missing `type` is handled like an unknown one.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// POST /api/v1/ai/suggestions
pub async fn suggestions(
    State(state): State<AppState>,
    AppJson(request): AppJson<AssistRequest>,
) -> AppResult<Json<Value>> {
    tracing::info!(kind = %request.kind, "AI assist request");
    let reply = state.assist.handle(&request.kind, &request.data).await?;
    Ok(Json(reply))
}

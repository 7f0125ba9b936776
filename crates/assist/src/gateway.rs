//! The assist gateway: resolve the request type, render the prompt, call the
//! model under a concurrency cap and parse its JSON reply.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Semaphore;

use crate::client::{ChatMessage, ChatModel, ChatRequest};
use crate::error::AssistError;
use crate::kind::AssistKind;
use crate::prompt::render_prompt;

/// Stateless request handler shared by all HTTP requests.
#[derive(Clone)]
pub struct AssistGateway {
    model: Arc<dyn ChatModel>,
    permits: Arc<Semaphore>,
}

impl AssistGateway {
    /// Wrap a model, allowing at most `max_concurrency` calls in flight.
    pub fn new(model: Arc<dyn ChatModel>, max_concurrency: usize) -> Self {
        Self {
            model,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Stop admitting model calls. Calls already holding a permit finish;
    /// later ones fail with [`AssistError::Unavailable`].
    pub fn close(&self) {
        self.permits.close();
    }

    /// Handle one `{type, data}` request.
    ///
    /// An unknown `kind` fails before the model is contacted. `data` may be
    /// absent (`null`); any other non-object value is rejected.
    pub async fn handle(&self, kind: &str, data: &Value) -> Result<Value, AssistError> {
        let kind: AssistKind = kind.parse()?;
        if !(data.is_object() || data.is_null()) {
            return Err(AssistError::InvalidRequest(
                "data must be a JSON object".into(),
            ));
        }

        let request = build_request(kind, data);

        let reply = {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| AssistError::Unavailable)?;
            tracing::debug!(kind = %kind, temperature = request.temperature, "Calling chat model");
            self.model.complete(&request).await?
        };

        let parsed = parse_reply(&reply).inspect_err(|e| {
            tracing::warn!(kind = %kind, error = %e, "Model reply could not be parsed");
        })?;

        Ok(if kind.wraps_reply() {
            json!({ "suggestions": parsed })
        } else {
            parsed
        })
    }
}

/// System + user message pair for a request.
pub fn build_request(kind: AssistKind, data: &Value) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(kind.system_prompt()),
            ChatMessage::user(render_prompt(kind, data)),
        ],
        temperature: kind.temperature(),
    }
}

/// Parse reply text as JSON, unwrapping a surrounding Markdown code fence.
pub fn parse_reply(reply: &str) -> Result<Value, AssistError> {
    serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| AssistError::UpstreamFormat(e.to_string()))
}

/// Remove a surrounding Markdown code fence (with optional language tag).
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // An info string (`json`) sits alone on the opening line; a payload
    // starting there is kept.
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim_start().starts_with(['{', '[']) => inner.trim(),
        _ => body.trim(),
    }
}

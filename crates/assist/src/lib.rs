//! AI assist gateway.
//!
//! Turns a `{type, data}` request into a prompt for a hosted chat model and
//! returns the model's JSON reply. The model sits behind the [`ChatModel`]
//! trait; [`OpenAiChatClient`] talks to any OpenAI-compatible
//! `/chat/completions` endpoint.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod kind;
pub mod prompt;

pub use client::{ChatMessage, ChatModel, ChatRequest, OpenAiChatClient};
pub use config::AssistConfig;
pub use error::AssistError;
pub use gateway::AssistGateway;
pub use kind::AssistKind;

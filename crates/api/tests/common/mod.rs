#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taskflow_api::config::ServerConfig;
use taskflow_api::router::build_app_router;
use taskflow_api::state::AppState;
use taskflow_assist::{AssistError, AssistGateway, ChatModel, ChatRequest};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        default_user_id: 1,
    }
}

/// Chat model double: returns a canned reply and counts calls.
pub struct FakeModel {
    reply: Result<String, u16>,
    pub calls: AtomicUsize,
    pub last: Mutex<Option<ChatRequest>>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AssistError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(AssistError::Upstream {
                status: *status,
                body: "upstream failure".into(),
            }),
        }
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// with a model that replies with an empty JSON object.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_model(pool, FakeModel::replying("{}"))
}

/// Build the application router around the given chat model.
pub fn build_test_app_with_model(pool: PgPool, model: Arc<dyn ChatModel>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        assist: AssistGateway::new(model, 2),
    };
    build_app_router(state, &config)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, &body)).await
}

/// POST with an explicit `x-user-id` header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    user_id: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let mut request = json_request(Method::POST, uri, &body);
    request
        .headers_mut()
        .insert("x-user-id", user_id.parse().unwrap());
    send(app, request).await
}

/// Insert a second user alongside the seeded demo user.
pub async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind("Second User")
        .fetch_one(pool)
        .await
        .unwrap()
}

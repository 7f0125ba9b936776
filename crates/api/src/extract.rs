//! Request extractors shared by all handlers.
//!
//! [`AppJson`], [`AppQuery`] and [`AppPath`] wrap the stock axum extractors
//! so rejections come back as the usual `{error, code}` body instead of
//! plain text. [`Caller`] resolves the requesting user.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use taskflow_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// The user on whose behalf a request is made.
///
/// Read from the `x-user-id` header; falls back to the configured default
/// user when the header is absent. A present but malformed header is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Caller {
                user_id: state.config.default_user_id,
            });
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<DbId>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                AppError::BadRequest(format!("{USER_ID_HEADER} must be a positive integer"))
            })?;

        Ok(Caller { user_id })
    }
}

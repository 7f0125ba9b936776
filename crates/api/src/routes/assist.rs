use axum::routing::post;
use axum::Router;

use crate::handlers::assist;
use crate::state::AppState;

/// Routes mounted at `/ai`.
pub fn router() -> Router<AppState> {
    Router::new().route("/suggestions", post(assist::suggestions))
}

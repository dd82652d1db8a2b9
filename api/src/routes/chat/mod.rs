//! Chat assistant: the embedded widget script and the rule-based reply
//! endpoint it posts to.

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod get;
pub mod post;

/// Builds and returns the `/chat` route group.
///
/// Routes:
/// - `GET  /chat/widget.js` → the client widget script (public asset)
/// - `POST /chat/reply` → rule-based reply endpoint (authenticated;
///   a 401 is what the widget renders as "session expired")
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/widget.js", get(get::widget_script))
        .route(
            "/reply",
            post(post::reply).route_layer(from_fn(allow_authenticated)),
        )
}

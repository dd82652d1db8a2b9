use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod get;
pub mod post;

/// Builds and returns the `/auth` route group.
///
/// Routes:
/// - `POST /auth/login` → authenticate and issue a JWT
/// - `GET  /auth/whoami` → current token claims and user record
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(post::login))
        .route("/whoami", get(get::whoami))
}

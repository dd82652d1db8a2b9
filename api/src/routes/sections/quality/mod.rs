//! Quality checks for one section. Checks are immutable inspection
//! history: the group exposes create and read only.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;
pub mod post;

/// Builds the `/sections/{section_id}/quality` route group.
///
/// Routes:
/// - `GET  /` → filtered check history + pass/fail stats (any assigned role)
/// - `POST /` → record an inspection (any assigned role)
pub fn quality_routes(_app_state: AppState) -> Router<AppState> {
    Router::new().route("/", get(get::list_checks).post(post::create_check))
}

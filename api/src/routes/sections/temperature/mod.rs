//! Temperature monitoring for one section: append-only readings with
//! derived alert flags against configured thresholds.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;
pub mod post;

/// Builds the `/sections/{section_id}/temperature` route group.
///
/// Routes:
/// - `GET  /` → filtered readings + min/max/avg stats (any assigned role)
/// - `POST /` → record a reading (any assigned role)
pub fn temperature_routes(_app_state: AppState) -> Router<AppState> {
    Router::new().route("/", get(get::list_readings).post(post::create_reading))
}

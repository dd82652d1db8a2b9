//! Labeling line monitoring dashboard.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

/// Builds the `/sections/{section_id}/labeling` route group.
///
/// Routes:
/// - `GET /` → line dashboard + throughput stats (any assigned role)
pub fn labeling_routes() -> Router<AppState> {
    Router::new().route("/", get(get::list_lines))
}

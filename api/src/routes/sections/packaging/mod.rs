//! Packaging line monitoring dashboard, including per-line OEE.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

/// Builds the `/sections/{section_id}/packaging` route group.
///
/// Routes:
/// - `GET /` → line dashboard + OEE stats (any assigned role)
pub fn packaging_routes() -> Router<AppState> {
    Router::new().route("/", get(get::list_lines))
}

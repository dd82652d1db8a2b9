//! Processing batch logs for the dehydration floor: entries with derived
//! yield and duration, recalculated on edit and never deleted.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use util::state::AppState;

use crate::auth::guards::allow_supervisor;

pub mod get;
pub mod post;
pub mod put;

/// Builds the `/sections/{section_id}/processing` route group.
///
/// Routes:
/// - `GET  /` → filtered batch list + yield stats (any assigned role)
/// - `POST /` → record a processing batch (any assigned role)
/// - `PUT  /{log_id}` → correct a batch entry (supervisor+); derived fields recalculate
pub fn processing_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_processing).post(post::create_log))
        .route(
            "/{log_id}",
            put(put::update_log).route_layer(from_fn_with_state(app_state, allow_supervisor)),
        )
}

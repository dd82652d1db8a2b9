//! Equipment registry for one section: machine status and utilization.

use axum::{Router, middleware::from_fn_with_state, routing::{get, put}};
use util::state::AppState;

use crate::auth::guards::allow_supervisor;

pub mod get;
pub mod put;

/// Builds the `/sections/{section_id}/equipment` route group.
///
/// Routes:
/// - `GET /` → filtered machine list + status stats (any assigned role)
/// - `PUT /{equipment_id}/status` → change a machine's status (supervisor+)
pub fn equipment_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_equipment))
        .route(
            "/{equipment_id}/status",
            put(put::set_status).route_layer(from_fn_with_state(app_state, allow_supervisor)),
        )
}

//! Inventory tracking for one section: stocked items, quantity
//! adjustments, and derived stock alerts.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use util::state::AppState;

use crate::auth::guards::allow_supervisor;

pub mod get;
pub mod post;
pub mod put;

/// Builds the `/sections/{section_id}/inventory` route group.
///
/// Routes:
/// - `GET  /` → filtered stock list + summary stats (any assigned role)
/// - `POST /` → register a new item (supervisor+)
/// - `PUT  /{item_id}` → edit an item (supervisor+)
/// - `POST /{item_id}/adjust` → apply a signed quantity delta (any assigned role)
pub fn inventory_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_inventory))
        .route(
            "/",
            post(post::create_item)
                .route_layer(from_fn_with_state(app_state.clone(), allow_supervisor)),
        )
        .route(
            "/{item_id}",
            put(put::update_item).route_layer(from_fn_with_state(app_state, allow_supervisor)),
        )
        .route("/{item_id}/adjust", post(post::adjust_quantity))
}

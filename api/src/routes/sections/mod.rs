//! # Sections Routes Module
//!
//! Defines and wires up routes for the `/api/sections` endpoint group: the
//! per-section production modules (inventory, processing, quality,
//! temperature, equipment, labeling, packaging).
//!
//! Every nested group is protected by a section role guard; handlers
//! additionally scope every query by the `section_id` taken from the path,
//! so data from one section is never reachable through another section's
//! URLs.

use axum::{Router, middleware::from_fn_with_state, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_assigned_to_section;

pub mod equipment;
pub mod get;
pub mod inventory;
pub mod labeling;
pub mod packaging;
pub mod processing;
pub mod quality;
pub mod temperature;

/// Builds and returns the `/sections` route group.
///
/// Routes:
/// - `GET /sections` → sections visible to the caller
///
/// Nested per-section groups (all behind `allow_assigned_to_section`;
/// mutating routes carry stricter guards inside each group):
/// - `/sections/{section_id}/inventory`
/// - `/sections/{section_id}/processing`
/// - `/sections/{section_id}/quality`
/// - `/sections/{section_id}/temperature`
/// - `/sections/{section_id}/equipment`
/// - `/sections/{section_id}/labeling`
/// - `/sections/{section_id}/packaging`
pub fn sections_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_sections))
        .nest(
            "/{section_id}/inventory",
            inventory::inventory_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/processing",
            processing::processing_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/quality",
            quality::quality_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/temperature",
            temperature::temperature_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/equipment",
            equipment::equipment_routes(app_state.clone()).route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/labeling",
            labeling::labeling_routes().route_layer(from_fn_with_state(
                app_state.clone(),
                allow_assigned_to_section,
            )),
        )
        .nest(
            "/{section_id}/packaging",
            packaging::packaging_routes().route_layer(from_fn_with_state(
                app_state,
                allow_assigned_to_section,
            )),
        )
}

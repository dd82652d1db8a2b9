//! # Me Routes Module
//!
//! Endpoints operating on the authenticated user's own record: profile,
//! password, preferences, and recent activity. Mounted behind
//! `allow_authenticated`.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod get;
pub mod preferences;
pub mod put;

/// Builds and returns the `/me` route group.
///
/// Routes:
/// - `GET /me`             → own profile with section roles
/// - `PUT /me`             → edit own email/full name
/// - `PUT /me/password`    → change own password
/// - `GET /me/preferences` → fetch preferences (created lazily)
/// - `PUT /me/preferences` → update preferences
/// - `GET /me/activity`    → own recent activity log entries
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::get_profile).put(put::update_profile))
        .route("/password", put(put::change_password))
        .route(
            "/preferences",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        .route("/activity", get(get::get_activity))
}

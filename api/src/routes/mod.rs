//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (e.g., authentication, users, sections,
//! reports), each protected via appropriate access control middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (login, whoami)
//! - `/users` → User management endpoints (admin-only)
//! - `/sections` → Section dashboards and per-section production modules
//! - `/me` → User-specific endpoints (profile, preferences, activity)
//! - `/reports` → CSV/print exporters and the SQL backup
//! - `/chat` → Chat assistant widget + reply endpoint

use crate::auth::guards::{allow_admin, allow_authenticated, validate_known_ids};
use crate::routes::{
    auth::auth_routes, chat::chat_routes, health::health_routes, me::me_routes,
    reports::reports_routes, sections::sections_routes, users::users_routes,
};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
};
use util::state::AppState;

pub mod auth;
pub mod chat;
pub mod common;
pub mod health;
pub mod me;
pub mod reports;
pub mod sections;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Authentication endpoints.
/// - `/users` → User management (restricted to admins via `allow_admin` middleware).
/// - `/sections` → Section-scoped production modules (authenticated; section
///   role guards applied per nested group).
/// - `/me` → User-specific endpoints.
/// - `/reports` → Report exporters (role-guarded per route).
/// - `/chat` → Widget asset (public) and reply endpoint (authenticated).
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/users", users_routes().route_layer(from_fn(allow_admin)))
        .nest(
            "/sections",
            sections_routes(app_state.clone())
                .route_layer(from_fn(allow_authenticated))
                .route_layer(from_fn_with_state(app_state.clone(), validate_known_ids)),
        )
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .nest("/reports", reports_routes(app_state.clone()))
        .nest("/chat", chat_routes())
        .with_state(app_state)
}

//! # Users Routes Module
//!
//! Defines and wires up routes for the `/api/users` endpoint group.
//! The whole group is mounted behind `allow_admin`; user accounts are
//! provisioned by administrators, not self-registered.
//!
//! ## Structure
//! - `get.rs` — list/fetch users and their section assignments
//! - `post.rs` — create users, assign section roles
//! - `put.rs` — edit users, enable/disable accounts
//! - `delete.rs` — delete users, remove section roles
//! - `common.rs` — shared response DTOs

use axum::{
    Router,
    routing::{delete, get, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds and returns the `/users` route group.
///
/// Routes:
/// - `GET    /users`                               → list users (filters + pagination)
/// - `POST   /users`                               → create a user
/// - `GET    /users/{user_id}`                     → fetch one user
/// - `PUT    /users/{user_id}`                     → edit user details
/// - `PUT    /users/{user_id}/active`              → enable/disable the account
/// - `DELETE /users/{user_id}`                     → delete the user
/// - `GET    /users/{user_id}/sections`            → list section assignments
/// - `POST   /users/{user_id}/sections`            → assign a section role
/// - `DELETE /users/{user_id}/sections/{section_id}` → remove a section role
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_users).post(post::create_user))
        .route(
            "/{user_id}",
            get(get::get_user)
                .put(put::update_user)
                .delete(delete::delete_user),
        )
        .route("/{user_id}/active", put(put::set_active))
        .route(
            "/{user_id}/sections",
            get(get::get_user_sections).post(post::assign_section_role),
        )
        .route(
            "/{user_id}/sections/{section_id}",
            delete(delete::remove_section_role),
        )
}

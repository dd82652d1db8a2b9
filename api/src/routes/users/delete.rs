use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::user::Entity as UserEntity;
use db::models::user_section_role::Model as UserSectionRoleModel;
use sea_orm::EntityTrait;
use util::state::AppState;

/// DELETE /api/users/{user_id}
///
/// Permanently deletes a user. Prefer `PUT /users/{user_id}/active` for
/// day-to-day off-boarding; deletion also cascades section roles.
///
/// ### Responses
/// - `200 OK` on deletion
/// - `404 Not Found` - User does not exist
/// - `500 Internal Server Error`
pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::delete_by_id(user_id).exec(db).await {
        Ok(res) if res.rows_affected > 0 => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                "delete",
                format!("Deleted user {}", user_id),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "User deleted successfully")),
            )
        }
        Ok(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("User not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
        ),
    }
}

/// DELETE /api/users/{user_id}/sections/{section_id}
///
/// Removes the user's role in a section.
///
/// ### Responses
/// - `200 OK` on removal (idempotent)
/// - `500 Internal Server Error`
pub async fn remove_section_role(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path((user_id, section_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserSectionRoleModel::remove_user_from_section(db, user_id, section_id).await {
        Ok(()) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                "remove_section_role",
                format!("Removed user {} from section {}", user_id, section_id),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Section role removed successfully")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
        ),
    }
}

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::users::common::UserItem;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,

    pub admin: Option<bool>,
}

/// PUT /api/users/{user_id}
///
/// Edit a user's email, full name, or admin flag. Requires admin privileges.
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `400 Bad Request` (validation failure)
/// - `404 Not Found` - User does not exist
/// - `500 Internal Server Error`
pub async fn update_user(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserItem>::error(format_validation_errors(&e))),
        );
    }

    let db = app_state.db();

    let user = match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<UserItem>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserItem>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut active: UserActiveModel = user.into();
    if let Some(email) = req.email {
        active.email = Set(email);
    }
    if let Some(full_name) = req.full_name {
        active.full_name = Set(full_name);
    }
    if let Some(admin) = req.admin {
        active.admin = Set(admin);
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                "update",
                format!("Updated user {}", user_id),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserItem::from(updated),
                    "User updated successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserItem>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// PUT /api/users/{user_id}/active
///
/// Soft-enables or disables an account. Disabled users cannot log in;
/// their rows and history remain intact.
///
/// ### Request Body
/// ```json
/// { "is_active": false }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated user
/// - `404 Not Found` - User does not exist
/// - `500 Internal Server Error`
pub async fn set_active(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(user_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserModel::set_active(db, user_id, req.is_active).await {
        Ok(updated) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                if req.is_active { "enable" } else { "disable" },
                format!("Set user {} active={}", user_id, req.is_active),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserItem::from(updated),
                    "User status updated successfully",
                )),
            )
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<UserItem>::error("User not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserItem>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

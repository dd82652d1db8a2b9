use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::users::common::UserItem;
use crate::services::activity::log_activity;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::format_validation_errors;
use db::models::user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
}

/// PUT /api/me
///
/// Edit the caller's own email or full name.
///
/// ### Responses
/// - `200 OK` with the updated profile
/// - `400 Bad Request` (validation failure)
/// - `500 Internal Server Error`
pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Json(req): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserItem>::error(format_validation_errors(&e))),
        );
    }

    let db = app_state.db();

    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
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
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "profile",
                "update",
                "Updated own profile".to_string(),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    UserItem::from(updated),
                    "Profile updated successfully",
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

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// PUT /api/me/password
///
/// Change the caller's password. The current password must verify.
///
/// ### Responses
/// - `200 OK` on change
/// - `400 Bad Request` (validation failure)
/// - `401 Unauthorized` - current password incorrect
/// - `500 Internal Server Error`
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Json(req): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&e))),
        );
    }

    let db = app_state.db();

    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
            );
        }
    };

    if !user.verify_password(&req.current_password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Current password is incorrect")),
        );
    }

    match UserModel::set_password(db, claims.sub, &req.new_password).await {
        Ok(_) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "profile",
                "change_password",
                "Changed own password".to_string(),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Password changed successfully")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
        ),
    }
}

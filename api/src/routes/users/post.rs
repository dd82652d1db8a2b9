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
use common::format_validation_errors;
use db::models::section::Model as SectionModel;
use db::models::user::Model as UserModel;
use db::models::user_section_role::{Model as UserSectionRoleModel, Role};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub admin: bool,
}

/// POST /api/users
///
/// Provision a new user account. Requires admin privileges.
///
/// ### Request Body
/// ```json
/// {
///   "username": "stores_lead",
///   "email": "stores@example.com",
///   "full_name": "Stores Lead",
///   "password": "strongpassword",
///   "admin": false
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new user
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate username or email)
/// - `500 Internal Server Error`
pub async fn create_user(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Json(req): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserItem>::error(format_validation_errors(
                &validation_errors,
            ))),
        );
    }

    let db = app_state.db();

    match UserModel::create(
        db,
        &req.username,
        &req.email,
        &req.full_name,
        &req.password,
        req.admin,
    )
    .await
    {
        Ok(user) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                "create",
                format!("Created user '{}' (id {})", user.username, user.id),
                ip.as_string(),
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    UserItem::from(user),
                    "User created successfully",
                )),
            )
        }
        Err(e) => {
            let msg = e.to_string();
            if msg.contains("users.email") || msg.contains("users.username") {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<UserItem>::error(
                        "A user with this username or email already exists",
                    )),
                );
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<UserItem>::error(format!(
                    "Database error: {}",
                    e
                ))),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignSectionRequest {
    pub section_id: i64,
    pub role: Role,
}

/// POST /api/users/{user_id}/sections
///
/// Assign the user to a section with a role. A second assignment to the
/// same section replaces the previous role.
///
/// ### Request Body
/// ```json
/// { "section_id": 2, "role": "supervisor" }
/// ```
///
/// ### Responses
/// - `200 OK` on assignment
/// - `404 Not Found` - unknown user or section
/// - `500 Internal Server Error`
pub async fn assign_section_role(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(user_id): Path<i64>,
    Json(req): Json<AssignSectionRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match SectionModel::exists(db, req.section_id).await {
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Section {} not found.",
                    req.section_id
                ))),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
            );
        }
        Ok(true) => {}
    }

    match UserSectionRoleModel::assign_user_to_section(db, user_id, req.section_id, req.role.clone())
        .await
    {
        Ok(_) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "users",
                "assign_section_role",
                format!(
                    "Assigned user {} to section {} as {}",
                    user_id, req.section_id, req.role
                ),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success((), "Section role assigned successfully")),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
        ),
    }
}

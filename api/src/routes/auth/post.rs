use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::format_validation_errors;
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub admin: bool,
    pub token: String,
    pub expires_at: String,
}

/// POST /auth/login
///
/// Authenticate an existing user and issue a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "username": "stores_lead",
///   "password": "strongpassword"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "username": "stores_lead",
///     "email": "stores@example.com",
///     "full_name": "Stores Lead",
///     "admin": false,
///     "token": "jwt_token_here",
///     "expires_at": "2026-01-05T12:00:00Z"
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// - `401 Unauthorized` (invalid credentials)
/// - `403 Forbidden` (account disabled)
/// - `500 Internal Server Error`
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(error_message)),
        );
    }

    let db = app_state.db();

    match UserModel::verify_credentials(db, &req.username, &req.password).await {
        Ok(Some(user)) => {
            if !user.is_active {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::<UserResponse>::error(
                        "This account has been disabled",
                    )),
                );
            }

            let (token, expiry) = generate_jwt(user.id, user.admin);
            let user_response = UserResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                admin: user.admin,
                token,
                expires_at: expiry,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(user_response, "Login successful")),
            )
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<UserResponse>::error(
                "Invalid username or password",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

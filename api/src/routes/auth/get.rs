use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user::{Entity as UserEntity, Model as UserModel};
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;

#[derive(Debug, Serialize, Default)]
pub struct WhoamiResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub admin: bool,
    pub is_active: bool,
    pub sections: Vec<SectionRoleItem>,
}

#[derive(Debug, Serialize)]
pub struct SectionRoleItem {
    pub section_id: i64,
    pub section_name: String,
    pub role: String,
}

/// GET /auth/whoami
///
/// Returns the user record and section assignments for the presented token.
///
/// ### Responses
/// - `200 OK`: Current user details
/// - `401 Unauthorized`: Missing or invalid JWT
/// - `404 Not Found`: Token subject no longer exists
pub async fn whoami(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> impl IntoResponse {
    let db = app_state.db();

    let user = match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<WhoamiResponse>::error("User not found")),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<WhoamiResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let sections = match UserModel::get_section_roles(db, user.id).await {
        Ok(roles) => roles
            .into_iter()
            .map(|r| SectionRoleItem {
                section_id: r.section_id,
                section_name: r.section_name,
                role: r.role.to_string(),
            })
            .collect(),
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<WhoamiResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            WhoamiResponse {
                id: user.id,
                username: user.username,
                email: user.email,
                full_name: user.full_name,
                admin: user.admin,
                is_active: user.is_active,
                sections,
            },
            "Current user retrieved successfully",
        )),
    )
}

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::section::Entity as SectionEntity;
use db::models::user::Model as UserModel;
use sea_orm::EntityTrait;
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct SectionItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub role: Option<String>,
}

/// GET /api/sections
///
/// Lists the sections visible to the caller. Admins see every section;
/// everyone else sees only the sections they hold a role in, along with
/// that role.
///
/// ### Responses
/// - `200 OK` with `[{ id, name, description, role }]`
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `500 Internal Server Error`
pub async fn list_sections(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    if claims.admin {
        return match SectionEntity::find().all(db).await {
            Ok(sections) => {
                let items = sections
                    .into_iter()
                    .map(|s| SectionItem {
                        id: s.id,
                        name: s.name,
                        description: s.description,
                        role: None,
                    })
                    .collect::<Vec<_>>();
                (
                    StatusCode::OK,
                    Json(ApiResponse::success(
                        items,
                        "Sections retrieved successfully",
                    )),
                )
            }
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<SectionItem>>::error(format!(
                    "Database error: {}",
                    e
                ))),
            ),
        };
    }

    match UserModel::get_section_roles(db, claims.sub).await {
        Ok(roles) => {
            let mut items = Vec::with_capacity(roles.len());
            for role in roles {
                let description = SectionEntity::find_by_id(role.section_id)
                    .one(db)
                    .await
                    .ok()
                    .flatten()
                    .and_then(|s| s.description);
                items.push(SectionItem {
                    id: role.section_id,
                    name: role.section_name,
                    description,
                    role: Some(role.role.to_string()),
                });
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    items,
                    "Sections retrieved successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<SectionItem>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::users::common::UserItem;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::activity_log::Model as ActivityLogModel;
use db::models::user::Entity as UserEntity;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use util::state::AppState;

/// GET /api/me
///
/// Returns the caller's own user record.
///
/// ### Responses
/// - `200 OK` with the user
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `404 Not Found` - Token subject no longer exists
pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::find_by_id(claims.sub).one(db).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserItem::from(user),
                "Profile retrieved successfully",
            )),
        ),
        Ok(None) => (
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

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ActivityItem {
    pub id: i64,
    pub module: String,
    pub action: String,
    pub details: String,
    pub created_at: String,
}

/// GET /api/me/activity
///
/// Returns the caller's most recent activity log entries, newest first.
///
/// ### Query Parameters
/// - `limit` (optional): Max entries to return (default 50, cap 200)
pub async fn get_activity(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<ActivityQuery>,
) -> impl IntoResponse {
    let db = app_state.db();
    let limit = query.limit.unwrap_or(50).min(200);

    match ActivityLogModel::recent_for_user(db, claims.sub, limit).await {
        Ok(entries) => {
            let items = entries
                .into_iter()
                .map(|e| ActivityItem {
                    id: e.id,
                    module: e.module,
                    action: e.action,
                    details: e.details,
                    created_at: e.created_at.to_rfc3339(),
                })
                .collect::<Vec<_>>();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    items,
                    "Activity retrieved successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<ActivityItem>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

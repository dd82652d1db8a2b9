use crate::response::ApiResponse;
use crate::routes::users::common::UserItem;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::format_validation_errors;
use db::models::user::{Column as UserColumn, Entity as UserEntity, Model as UserModel};
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub query: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub admin: Option<bool>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, Default)]
pub struct UsersListResponse {
    pub users: Vec<UserItem>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// GET /api/users
///
/// Retrieve a paginated list of users with optional filtering and sorting.
/// Requires admin privileges.
///
/// ### Query Parameters
/// - `page` (optional): Page number (default: 1, min: 1)
/// - `per_page` (optional): Items per page (default: 20, min: 1, max: 100)
/// - `query` (optional): Case-insensitive partial match against email OR username
/// - `email` (optional): Case-insensitive partial match on email
/// - `username` (optional): Case-insensitive partial match on username
/// - `admin` (optional): Filter by admin status (true/false)
/// - `active` (optional): Filter by account status (true/false)
/// - `sort` (optional): Comma-separated sort fields. Use `-` prefix for descending
///
/// ### Examples
/// ```http
/// GET /api/users?page=2&per_page=10
/// GET /api/users?query=lead
/// GET /api/users?admin=true&sort=-created_at
/// ```
///
/// ### Responses
/// - `200 OK` with `{ users, page, per_page, total }`
/// - `400 Bad Request` - Invalid query parameters
/// - `401 Unauthorized` - Missing or invalid JWT
/// - `403 Forbidden` - Authenticated but not admin user
/// - `500 Internal Server Error` - Database error
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UsersListResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    let mut condition = Condition::all();

    if let Some(q) = &query.query {
        let pattern = format!("%{}%", q.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(UserColumn::Email.contains(pattern.as_str()))
                .add(UserColumn::Username.contains(pattern.as_str())),
        );
    }

    if let Some(email) = &query.email {
        condition = condition.add(UserColumn::Email.contains(format!("%{}%", email)));
    }

    if let Some(username) = &query.username {
        condition = condition.add(UserColumn::Username.contains(format!("%{}%", username)));
    }

    if let Some(admin) = query.admin {
        condition = condition.add(UserColumn::Admin.eq(admin));
    }

    if let Some(active) = query.active {
        condition = condition.add(UserColumn::IsActive.eq(active));
    }

    let mut query_builder = UserEntity::find().filter(condition);

    if let Some(sort_param) = &query.sort {
        for sort_field in sort_param.split(',') {
            let (field, desc) = if let Some(stripped) = sort_field.strip_prefix('-') {
                (stripped, true)
            } else {
                (sort_field, false)
            };

            match field {
                "email" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(UserColumn::Email)
                    } else {
                        query_builder.order_by_asc(UserColumn::Email)
                    };
                }
                "username" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(UserColumn::Username)
                    } else {
                        query_builder.order_by_asc(UserColumn::Username)
                    };
                }
                "created_at" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(UserColumn::CreatedAt)
                    } else {
                        query_builder.order_by_asc(UserColumn::CreatedAt)
                    };
                }
                "admin" => {
                    query_builder = if desc {
                        query_builder.order_by_desc(UserColumn::Admin)
                    } else {
                        query_builder.order_by_asc(UserColumn::Admin)
                    };
                }
                _ => {}
            }
        }
    } else {
        query_builder = query_builder.order_by_asc(UserColumn::Id);
    }

    let paginator = query_builder.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0);
    let users = paginator.fetch_page(page - 1).await.unwrap_or_default();
    let users = users.into_iter().map(UserItem::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            UsersListResponse {
                users,
                page,
                per_page,
                total,
            },
            "Users retrieved successfully",
        )),
    )
}

/// GET /api/users/{user_id}
///
/// Fetch a single user by ID. Requires admin privileges.
///
/// ### Responses
/// - `200 OK`: User found
/// - `404 Not Found`: User does not exist
/// - `500 Internal Server Error`: DB error
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserEntity::find_by_id(user_id).one(db).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserItem::from(user),
                "User retrieved successfully",
            )),
        ),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<UserItem>::error("User not found")),
        ),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<UserItem>::error(format!(
                "Database error: {}",
                err
            ))),
        ),
    }
}

#[derive(Debug, Serialize)]
pub struct UserSectionItem {
    pub section_id: i64,
    pub section_name: String,
    pub role: String,
}

/// GET /api/users/{user_id}/sections
///
/// Retrieve all sections a user is assigned to, including their role in each.
/// Requires admin privileges.
///
/// ### Responses
/// - `200 OK` with a list of `{ section_id, section_name, role }`
/// - `404 Not Found` - User not found
/// - `500 Internal Server Error` - Database error
pub async fn get_user_sections(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();

    if let Ok(None) = UserEntity::find_by_id(user_id).one(db).await {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<Vec<UserSectionItem>>::error("User not found")),
        );
    }

    match UserModel::get_section_roles(db, user_id).await {
        Ok(roles) => {
            let sections = roles
                .into_iter()
                .map(|r| UserSectionItem {
                    section_id: r.section_id,
                    section_name: r.section_name,
                    role: r.role.to_string(),
                })
                .collect::<Vec<_>>();

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    sections,
                    "Sections for user retrieved successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<UserSectionItem>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

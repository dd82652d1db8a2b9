use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user;
use sea_orm::DatabaseConnection;
use std::collections::{HashMap, HashSet};
use util::{config, state::AppState};

// --- Superuser ---
use once_cell::sync::Lazy;

pub static SUPERUSER_IDS: Lazy<HashSet<i64>> =
    Lazy::new(|| config::super_users().into_iter().collect());

pub async fn is_superuser(user_id: i64) -> bool {
    SUPERUSER_IDS.contains(&user_id)
}

// --- Role Based Access Guards ---

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Helper to extract, validate user from request extensions and insert them back into the request
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Helper to check if user has any of the specified roles
async fn user_has_any_role(
    db: &DatabaseConnection,
    user_id: i64,
    section_id: i64,
    roles: &[&str],
) -> bool {
    if roles.is_empty() {
        // No roles specified -> deny (fail-safe)
        return false;
    }

    for role in roles {
        match user::Model::is_in_role(db, user_id, section_id, role).await {
            Ok(true) => return true,
            Ok(false) => continue,
            Err(e) => {
                // Log and deny on DB error (fail-safe)
                tracing::warn!(
                    error = %e,
                    user_id, section_id, role,
                    "DB error while checking role; denying access"
                );
                return false;
            }
        }
    }
    false
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !user.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}

/// Base role-based access guard that other guards can build upon
async fn allow_role_base(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
    required_roles: &[&str],
    failure_msg: &str,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let db: &DatabaseConnection = app_state.db();

    let (req, user) = extract_and_insert_authuser(req).await?;

    let section_id = params
        .get("section_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing or invalid section_id")),
        ))?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    if is_superuser(user.0.sub).await {
        return Ok(next.run(req).await);
    }

    if user_has_any_role(db, user.0.sub, section_id, required_roles).await {
        Ok(next.run(req).await)
    } else {
        Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))))
    }
}

/// Compute the set of roles that are considered "higher or equal" in privilege to the provided role.
///
/// Hierarchy (high -> low): Manager > Supervisor > Operator
/// If you allow a role you implicitly allow all roles ABOVE it ("higher roles").
/// Example: allowing "Operator" permits Operator, Supervisor, and Manager.
fn roles_higher_or_equal(role: &str) -> &'static [&'static str] {
    match role {
        "Manager" => &["Manager"],
        "Supervisor" => &["Manager", "Supervisor"],
        "Operator" => &["Manager", "Supervisor", "Operator"],
        _ => &[], // Fail-safe: unknown role => deny later
    }
}

/// Guard for allowing Manager only (the highest section role).
pub async fn allow_manager(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let allowed = roles_higher_or_equal("Manager");
    allow_role_base(
        State(app_state),
        Path(params),
        req,
        next,
        allowed,
        "Manager access required for this section",
    )
    .await
}

/// Guard for allowing Supervisor and higher (Supervisor, Manager).
pub async fn allow_supervisor(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let allowed = roles_higher_or_equal("Supervisor");
    allow_role_base(
        State(app_state),
        Path(params),
        req,
        next,
        allowed,
        "Supervisor (or higher) access required for this section",
    )
    .await
}

/// Guard for allowing any assigned role (Manager, Supervisor, Operator).
pub async fn allow_assigned_to_section(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_role_base(
        State(app_state),
        Path(params),
        req,
        next,
        roles_higher_or_equal("Operator"),
        "User not assigned to this section",
    )
    .await
}

// --- Path ID Guards ---

async fn check_section_exists(
    section_id: i64,
    db: &DatabaseConnection,
) -> Result<(), (StatusCode, Json<ApiResponse<Empty>>)> {
    let found = db::models::section::Model::exists(db, section_id)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error while checking section")),
            )
        })?;

    if !found {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Section {} not found.",
                section_id
            ))),
        ));
    }
    Ok(())
}

/// Validates any `section_id` path parameter before the handler runs, so a
/// request addressing an unknown section is rejected up front.
pub async fn validate_known_ids(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    use axum::response::IntoResponse;

    let db = app_state.db();

    if let Some(raw) = params.get("section_id") {
        let section_id = raw.parse::<i64>().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error(format!(
                    "Invalid section_id: '{}'. Must be an integer.",
                    raw
                ))),
            )
                .into_response()
        })?;

        check_section_exists(section_id, db)
            .await
            .map_err(|e| e.into_response())?;
    }

    Ok(next.run(req).await)
}

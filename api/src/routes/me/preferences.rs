use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use db::models::user_preference::Model as UserPreferenceModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;

#[derive(Debug, Serialize, Default)]
pub struct PreferencesResponse {
    pub theme: String,
    pub email_notifications: bool,
    pub alert_notifications: bool,
}

impl From<UserPreferenceModel> for PreferencesResponse {
    fn from(p: UserPreferenceModel) -> Self {
        Self {
            theme: p.theme,
            email_notifications: p.email_notifications,
            alert_notifications: p.alert_notifications,
        }
    }
}

/// GET /api/me/preferences
///
/// Fetch the caller's preferences. The row is created with defaults on the
/// first visit and updated in place afterwards.
///
/// ### Responses
/// - `200 OK` with `{ theme, email_notifications, alert_notifications }`
/// - `500 Internal Server Error`
pub async fn get_preferences(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserPreferenceModel::get_or_create(db, claims.sub).await {
        Ok(prefs) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PreferencesResponse::from(prefs),
                "Preferences retrieved successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PreferencesResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub theme: Option<String>,
    pub email_notifications: Option<bool>,
    pub alert_notifications: Option<bool>,
}

/// PUT /api/me/preferences
///
/// Update any subset of the caller's preferences.
///
/// ### Request Body
/// ```json
/// { "theme": "dark", "alert_notifications": false }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated preferences
/// - `500 Internal Server Error`
pub async fn update_preferences(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UpdatePreferencesRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match UserPreferenceModel::update_settings(
        db,
        claims.sub,
        req.theme.as_deref(),
        req.email_notifications,
        req.alert_notifications,
    )
    .await
    {
        Ok(prefs) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PreferencesResponse::from(prefs),
                "Preferences updated successfully",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<PreferencesResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::temperature_log::Model as ReadingModel;
use serde::{Deserialize, Serialize};
use util::{config, state::AppState};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReadingRequest {
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = -50.0, max = 150.0, message = "Temperature out of range"))]
    pub temperature_c: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "Humidity out of range"))]
    pub humidity_pct: Option<f64>,

    pub recorded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Default)]
pub struct CreateReadingResponse {
    pub id: i64,
    pub alert_status: String,
}

/// POST /api/sections/{section_id}/temperature
///
/// Record a temperature reading for a monitored location. The response
/// carries the derived alert flag so the recording client can surface it
/// immediately.
///
/// ### Request Body
/// ```json
/// { "location": "cold room 1", "temperature_c": 6.5, "humidity_pct": 58.0 }
/// ```
///
/// ### Responses
/// - `201 Created` with `{ id, alert_status }`
/// - `400 Bad Request` (validation failure)
/// - `500 Internal Server Error`
pub async fn create_reading(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(section_id): Path<i64>,
    Json(req): Json<CreateReadingRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CreateReadingResponse>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();

    match ReadingModel::create(
        db,
        section_id,
        &req.location,
        req.temperature_c,
        req.humidity_pct,
        claims.sub,
        req.recorded_at.unwrap_or_else(Utc::now),
    )
    .await
    {
        Ok(reading) => {
            let alert = reading.alert_status(config::temp_warning_c(), config::temp_critical_c());
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "temperature",
                "create",
                format!(
                    "Recorded {:.1}C at '{}' in section {}",
                    reading.temperature_c, reading.location, section_id
                ),
                ip.as_string(),
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    CreateReadingResponse {
                        id: reading.id,
                        alert_status: alert.to_string(),
                    },
                    "Temperature reading recorded successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<CreateReadingResponse>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

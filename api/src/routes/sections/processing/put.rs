use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::sections::processing::get::ProcessingLogDto;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::processing_log::Model as LogModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLogRequest {
    #[validate(range(min = 0.000001, message = "Input quantity must be positive"))]
    pub input_quantity: f64,

    #[validate(range(min = 0.0, message = "Output quantity cannot be negative"))]
    pub output_quantity: Option<f64>,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

/// PUT /api/sections/{section_id}/processing/{log_id}
///
/// Correct a batch entry. Requires supervisor or higher within the
/// section. Yield and duration are recalculated from the new values; an
/// end time before the start time is rejected on this path too.
///
/// ### Responses
/// - `200 OK` with the updated batch
/// - `400 Bad Request` (validation failure, or end before start)
/// - `404 Not Found` - No such batch in this section
/// - `500 Internal Server Error`
pub async fn update_log(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path((section_id, log_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateLogRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ProcessingLogDto>::error(
                format_validation_errors(&e),
            )),
        );
    }

    if let Some(ended_at) = req.ended_at {
        if ended_at < req.started_at {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ProcessingLogDto>::error(
                    "End time cannot be before start time",
                )),
            );
        }
    }

    let db = app_state.db();

    match LogModel::update_quantities(
        db,
        section_id,
        log_id,
        req.input_quantity,
        req.output_quantity,
        req.started_at,
        req.ended_at,
        req.notes.as_deref(),
    )
    .await
    {
        Ok(log) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "processing",
                "update",
                format!("Corrected batch '{}' in section {}", log.batch_code, section_id),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ProcessingLogDto::from(log),
                    "Processing log updated successfully",
                )),
            )
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ProcessingLogDto>::error(
                "Processing log not found",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProcessingLogDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

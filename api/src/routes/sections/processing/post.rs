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
pub struct CreateLogRequest {
    #[validate(length(min = 1, message = "Batch code is required"))]
    pub batch_code: String,

    #[validate(length(min = 1, message = "Product is required"))]
    pub product: String,

    #[validate(range(min = 0.000001, message = "Input quantity must be positive"))]
    pub input_quantity: f64,

    #[validate(range(min = 0.0, message = "Output quantity cannot be negative"))]
    pub output_quantity: Option<f64>,

    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,

    pub supervisor_id: Option<i64>,
    pub notes: Option<String>,
}

/// POST /api/sections/{section_id}/processing
///
/// Record a processing batch. The caller becomes the operator of record.
/// Yield and duration are derived on the way in; an end time before the
/// start time is rejected, never stored as a negative duration.
///
/// ### Request Body
/// ```json
/// {
///   "batch_code": "B-1042",
///   "product": "Dried mango",
///   "input_quantity": 120.0,
///   "output_quantity": 21.5,
///   "started_at": "2026-01-05T08:00:00Z",
///   "ended_at": "2026-01-05T14:30:00Z"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the batch (derived fields included)
/// - `400 Bad Request` (validation failure, or end before start)
/// - `500 Internal Server Error`
pub async fn create_log(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(section_id): Path<i64>,
    Json(req): Json<CreateLogRequest>,
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

    match LogModel::create(
        db,
        section_id,
        &req.batch_code,
        &req.product,
        req.input_quantity,
        req.output_quantity,
        req.started_at,
        req.ended_at,
        claims.sub,
        req.supervisor_id,
        req.notes.as_deref(),
    )
    .await
    {
        Ok(log) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "processing",
                "create",
                format!("Recorded batch '{}' in section {}", log.batch_code, section_id),
                ip.as_string(),
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    ProcessingLogDto::from(log),
                    "Processing log created successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<ProcessingLogDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

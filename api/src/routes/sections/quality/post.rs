use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::sections::quality::get::QualityCheckDto;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use common::format_validation_errors;
use db::models::quality_check::{CheckStatus, Grade, Model as CheckModel};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCheckRequest {
    #[validate(length(min = 1, message = "Batch code is required"))]
    pub batch_code: String,

    pub checked_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Sample size must be at least 1"))]
    pub sample_size: i64,

    #[validate(range(min = 0, message = "Defect count cannot be negative"))]
    pub defect_count: i64,

    pub status: CheckStatus,
    pub grade: Grade,

    pub notes: Option<String>,
}

/// POST /api/sections/{section_id}/quality
///
/// Record an inspection. The caller becomes the inspector of record.
/// Checks are immutable once written; a correction is a new check.
///
/// ### Request Body
/// ```json
/// {
///   "batch_code": "B-1042",
///   "sample_size": 200,
///   "defect_count": 3,
///   "status": "passed",
///   "grade": "a"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the check
/// - `400 Bad Request` (validation failure, or defects exceeding the sample)
/// - `500 Internal Server Error`
pub async fn create_check(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(section_id): Path<i64>,
    Json(req): Json<CreateCheckRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QualityCheckDto>::error(
                format_validation_errors(&e),
            )),
        );
    }

    if req.defect_count > req.sample_size {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<QualityCheckDto>::error(
                "Defect count cannot exceed sample size",
            )),
        );
    }

    let db = app_state.db();

    match CheckModel::create(
        db,
        section_id,
        &req.batch_code,
        req.checked_at.unwrap_or_else(Utc::now),
        req.sample_size,
        req.defect_count,
        req.status,
        req.grade,
        claims.sub,
        req.notes.as_deref(),
    )
    .await
    {
        Ok(check) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "quality",
                "create",
                format!(
                    "Inspected batch '{}' in section {}: {}",
                    check.batch_code, section_id, check.status
                ),
                ip.as_string(),
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    QualityCheckDto::from(check),
                    "Quality check recorded successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<QualityCheckDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

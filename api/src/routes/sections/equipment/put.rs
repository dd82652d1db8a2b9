use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::sections::equipment::get::EquipmentDto;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::equipment::{EquipmentStatus, Model as EquipmentModel};
use serde::Deserialize;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: EquipmentStatus,
}

/// PUT /api/sections/{section_id}/equipment/{equipment_id}/status
///
/// Change a machine's status. Moving into `maintenance` stamps the last
/// maintenance time. Requires supervisor or higher within the section.
///
/// ### Request Body
/// ```json
/// { "status": "maintenance" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated machine
/// - `404 Not Found` - No such machine in this section
/// - `500 Internal Server Error`
pub async fn set_status(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path((section_id, equipment_id)): Path<(i64, i64)>,
    Json(req): Json<SetStatusRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match EquipmentModel::set_status(db, section_id, equipment_id, req.status.clone()).await {
        Ok(updated) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "equipment",
                "set_status",
                format!(
                    "Set equipment '{}' in section {} to {}",
                    updated.code, section_id, updated.status
                ),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    EquipmentDto::from(updated),
                    "Equipment status updated successfully",
                )),
            )
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<EquipmentDto>::error("Equipment not found")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<EquipmentDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::labeling_line::{
    Column as LineColumn, Entity as LineEntity, LineStatus, Model as LineModel,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::filters::FilterParam;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListLinesQuery {
    pub status: Option<String>,
    pub label_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelingLineDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub status: String,
    pub label_type: String,
    pub speed_per_minute: f64,
    pub labels_applied_today: i64,
    pub last_maintenance_at: Option<String>,
    pub next_maintenance_at: Option<String>,
}

impl From<LineModel> for LabelingLineDto {
    fn from(m: LineModel) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            status: m.status.to_string(),
            label_type: m.label_type,
            speed_per_minute: m.speed_per_minute,
            labels_applied_today: m.labels_applied_today,
            last_maintenance_at: m.last_maintenance_at.map(|t| t.to_rfc3339()),
            next_maintenance_at: m.next_maintenance_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct LabelingStats {
    pub total_lines: u64,
    pub running: u64,
    pub total_labels_today: i64,
    pub avg_speed_per_minute: Option<f64>,
}

#[derive(Debug, Serialize, Default)]
pub struct LabelingListResponse {
    pub stats: LabelingStats,
    pub lines: Vec<LabelingLineDto>,
}

fn resolve_column(name: &str) -> Result<LineColumn, DbErr> {
    match name {
        "section_id" => Ok(LineColumn::SectionId),
        "status" => Ok(LineColumn::Status),
        "label_type" => Ok(LineColumn::LabelType),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/labeling
///
/// Labeling line dashboard ordered by status then code. Stats and the
/// line list come from one shared condition.
///
/// ### Query Parameters
/// - `status` (optional): `running`, `idle`, `maintenance`, or `offline`
/// - `label_type` (optional): Exact label-stock match
///
/// ### Responses
/// - `200 OK` with `{ stats, lines }`; empty match is a success
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_lines(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListLinesQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(status) = &query.status {
        params.push(FilterParam::eq("status", status.to_lowercase().as_str()));
    }
    if let Some(label_type) = &query.label_type {
        params.push(FilterParam::eq("label_type", label_type.as_str()));
    }

    let condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LabelingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let total_lines = match LineEntity::find().filter(condition.clone()).count(db).await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LabelingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match LineEntity::find()
        .filter(condition)
        .order_by_asc(LineColumn::Status)
        .order_by_asc(LineColumn::Code)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<LabelingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut stats = LabelingStats {
        total_lines,
        ..Default::default()
    };
    let mut speed_sum = 0.0;
    for row in &rows {
        stats.total_labels_today += row.labels_applied_today;
        if row.status == LineStatus::Running {
            stats.running += 1;
        }
        speed_sum += row.speed_per_minute;
    }
    if !rows.is_empty() {
        stats.avg_speed_per_minute = Some(speed_sum / rows.len() as f64);
    }

    let lines = rows.into_iter().map(LabelingLineDto::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            LabelingListResponse { stats, lines },
            "Labeling lines retrieved successfully",
        )),
    )
}

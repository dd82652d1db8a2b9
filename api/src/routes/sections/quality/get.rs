use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::quality_check::{
    CheckStatus, Column as CheckColumn, Entity as CheckEntity, Model as CheckModel,
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::filters::{FilterParam, date_range_params};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListChecksQuery {
    pub status: Option<String>,
    pub grade: Option<String>,
    pub batch: Option<String>,
    /// `YYYY-MM-DD` range on the inspection time.
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct QualityCheckDto {
    pub id: i64,
    pub batch_code: String,
    pub checked_at: String,
    pub sample_size: i64,
    pub defect_count: i64,
    pub defect_rate_pct: Option<f64>,
    pub status: String,
    pub grade: String,
    pub inspector_id: i64,
    pub notes: Option<String>,
}

impl From<CheckModel> for QualityCheckDto {
    fn from(check: CheckModel) -> Self {
        let defect_rate_pct = check.defect_rate_pct();
        Self {
            id: check.id,
            batch_code: check.batch_code,
            checked_at: check.checked_at.to_rfc3339(),
            sample_size: check.sample_size,
            defect_count: check.defect_count,
            defect_rate_pct,
            status: check.status.to_string(),
            grade: check.grade.to_string(),
            inspector_id: check.inspector_id,
            notes: check.notes,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct QualityStats {
    pub total_checks: u64,
    pub passed: u64,
    pub rework: u64,
    pub rejected: u64,
    pub total_defects: i64,
}

#[derive(Debug, Serialize, Default)]
pub struct QualityListResponse {
    pub stats: QualityStats,
    pub checks: Vec<QualityCheckDto>,
}

fn resolve_column(name: &str) -> Result<CheckColumn, DbErr> {
    match name {
        "section_id" => Ok(CheckColumn::SectionId),
        "status" => Ok(CheckColumn::Status),
        "grade" => Ok(CheckColumn::Grade),
        "checked_at" => Ok(CheckColumn::CheckedAt),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/quality
///
/// Filtered inspection history, newest first, with pass/rework/reject
/// counts. Stats and the detail list come from one shared condition.
///
/// ### Query Parameters
/// - `status` (optional): `passed`, `rework`, or `rejected`
/// - `grade` (optional): `a`, `b`, or `c`
/// - `batch` (optional): Case-insensitive partial match on batch code
/// - `from` / `to` (optional): `YYYY-MM-DD` range on the inspection time
///
/// ### Responses
/// - `200 OK` with `{ stats, checks }`; empty match is a success
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_checks(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListChecksQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(status) = &query.status {
        params.push(FilterParam::eq("status", status.to_lowercase().as_str()));
    }
    if let Some(grade) = &query.grade {
        params.push(FilterParam::eq("grade", grade.to_lowercase().as_str()));
    }
    params.extend(date_range_params(
        "checked_at",
        query.from.as_deref(),
        query.to.as_deref(),
    ));

    let mut condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QualityListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(batch) = &query.batch {
        let pattern = format!("%{}%", batch.to_lowercase());
        condition = condition.add(CheckColumn::BatchCode.contains(pattern.as_str()));
    }

    let total_checks = match CheckEntity::find().filter(condition.clone()).count(db).await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QualityListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match CheckEntity::find()
        .filter(condition)
        .order_by_desc(CheckColumn::CheckedAt)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<QualityListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut stats = QualityStats {
        total_checks,
        ..Default::default()
    };
    for row in &rows {
        stats.total_defects += row.defect_count;
        match row.status {
            CheckStatus::Passed => stats.passed += 1,
            CheckStatus::Rework => stats.rework += 1,
            CheckStatus::Rejected => stats.rejected += 1,
        }
    }

    let checks = rows.into_iter().map(QualityCheckDto::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            QualityListResponse { stats, checks },
            "Quality checks retrieved successfully",
        )),
    )
}

use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::temperature_log::{Column as ReadingColumn, Entity as ReadingEntity, TempAlert};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::filters::{FilterParam, date_range_params};
use util::{config, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ListReadingsQuery {
    pub location: Option<String>,
    pub alert: Option<String>,
    /// `YYYY-MM-DD` range on the reading time.
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemperatureReadingDto {
    pub id: i64,
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: Option<f64>,
    pub alert_status: TempAlert,
    pub recorded_by: i64,
    pub recorded_at: String,
}

#[derive(Debug, Serialize, Default)]
pub struct TemperatureStats {
    pub total_readings: u64,
    pub min_c: Option<f64>,
    pub max_c: Option<f64>,
    pub avg_c: Option<f64>,
    pub warnings: u64,
    pub criticals: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct TemperatureListResponse {
    pub stats: TemperatureStats,
    pub readings: Vec<TemperatureReadingDto>,
}

fn resolve_column(name: &str) -> Result<ReadingColumn, DbErr> {
    match name {
        "section_id" => Ok(ReadingColumn::SectionId),
        "location" => Ok(ReadingColumn::Location),
        "recorded_at" => Ok(ReadingColumn::RecordedAt),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/temperature
///
/// Filtered readings, newest first, with min/max/avg and alert counts.
/// Stats and the detail list come from one shared condition.
///
/// ### Query Parameters
/// - `location` (optional): Exact monitored-location match
/// - `alert` (optional): Narrow the detail list to `ok`, `warning`, or
///   `critical` (derived, so presentation-only; stats keep the full set)
/// - `from` / `to` (optional): `YYYY-MM-DD` range on the reading time
///
/// ### Responses
/// - `200 OK` with `{ stats, readings }`; empty match is a success
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_readings(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListReadingsQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(location) = &query.location {
        params.push(FilterParam::eq("location", location.as_str()));
    }
    params.extend(date_range_params(
        "recorded_at",
        query.from.as_deref(),
        query.to.as_deref(),
    ));

    let condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TemperatureListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let total_readings = match ReadingEntity::find()
        .filter(condition.clone())
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TemperatureListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match ReadingEntity::find()
        .filter(condition)
        .order_by_desc(ReadingColumn::RecordedAt)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<TemperatureListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let warning_c = config::temp_warning_c();
    let critical_c = config::temp_critical_c();

    let mut stats = TemperatureStats {
        total_readings,
        ..Default::default()
    };
    let mut sum = 0.0;
    for row in &rows {
        sum += row.temperature_c;
        stats.min_c = Some(stats.min_c.map_or(row.temperature_c, |m: f64| m.min(row.temperature_c)));
        stats.max_c = Some(stats.max_c.map_or(row.temperature_c, |m: f64| m.max(row.temperature_c)));
        match row.alert_status(warning_c, critical_c) {
            TempAlert::Warning => stats.warnings += 1,
            TempAlert::Critical => stats.criticals += 1,
            TempAlert::Ok => {}
        }
    }
    if !rows.is_empty() {
        stats.avg_c = Some(sum / rows.len() as f64);
    }

    let alert_filter = query.alert.as_deref().and_then(|a| TempAlert::from_str(a).ok());
    let readings = rows
        .into_iter()
        .filter(|row| {
            alert_filter.is_none_or(|wanted| row.alert_status(warning_c, critical_c) == wanted)
        })
        .map(|row| {
            let alert_status = row.alert_status(warning_c, critical_c);
            TemperatureReadingDto {
                id: row.id,
                location: row.location,
                temperature_c: row.temperature_c,
                humidity_pct: row.humidity_pct,
                alert_status,
                recorded_by: row.recorded_by,
                recorded_at: row.recorded_at.to_rfc3339(),
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            TemperatureListResponse { stats, readings },
            "Temperature readings retrieved successfully",
        )),
    )
}

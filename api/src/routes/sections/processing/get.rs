use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::processing_log::{Column as LogColumn, Entity as LogEntity, Model as LogModel};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::filters::{FilterParam, date_range_params};
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListProcessingQuery {
    pub product: Option<String>,
    pub operator_id: Option<i64>,
    pub batch: Option<String>,
    /// `YYYY-MM-DD`; compared against the start-of-day bound.
    pub from: Option<String>,
    /// `YYYY-MM-DD`; inclusive of the whole day.
    pub to: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct ProcessingLogDto {
    pub id: i64,
    pub batch_code: String,
    pub product: String,
    pub input_quantity: f64,
    pub output_quantity: Option<f64>,
    pub yield_pct: Option<f64>,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub duration_minutes: Option<i64>,
    pub operator_id: i64,
    pub supervisor_id: Option<i64>,
    pub notes: Option<String>,
}

impl From<LogModel> for ProcessingLogDto {
    fn from(log: LogModel) -> Self {
        Self {
            id: log.id,
            batch_code: log.batch_code,
            product: log.product,
            input_quantity: log.input_quantity,
            output_quantity: log.output_quantity,
            yield_pct: log.yield_pct,
            started_at: log.started_at.to_rfc3339(),
            ended_at: log.ended_at.map(|t| t.to_rfc3339()),
            duration_minutes: log.duration_minutes,
            operator_id: log.operator_id,
            supervisor_id: log.supervisor_id,
            notes: log.notes,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ProcessingStats {
    pub total_batches: u64,
    pub total_input: f64,
    pub total_output: f64,
    pub avg_yield_pct: Option<f64>,
    pub open_batches: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct ProcessingListResponse {
    pub stats: ProcessingStats,
    pub logs: Vec<ProcessingLogDto>,
}

fn resolve_column(name: &str) -> Result<LogColumn, DbErr> {
    match name {
        "section_id" => Ok(LogColumn::SectionId),
        "product" => Ok(LogColumn::Product),
        "operator_id" => Ok(LogColumn::OperatorId),
        "started_at" => Ok(LogColumn::StartedAt),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/processing
///
/// Filtered batch history with yield stats, newest batches first. Stats
/// and the detail list come from one shared condition.
///
/// ### Query Parameters
/// - `product` (optional): Exact product match
/// - `operator_id` (optional): Batches run by one operator
/// - `batch` (optional): Case-insensitive partial match on batch code
/// - `from` / `to` (optional): `YYYY-MM-DD` range on the start time;
///   date-only values cover their whole day
///
/// ### Responses
/// - `200 OK` with `{ stats, logs }`; empty match is a success
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_processing(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListProcessingQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(product) = &query.product {
        params.push(FilterParam::eq("product", product.as_str()));
    }
    if let Some(operator_id) = query.operator_id {
        params.push(FilterParam::eq("operator_id", operator_id));
    }
    params.extend(date_range_params(
        "started_at",
        query.from.as_deref(),
        query.to.as_deref(),
    ));

    let mut condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProcessingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(batch) = &query.batch {
        let pattern = format!("%{}%", batch.to_lowercase());
        condition = condition.add(LogColumn::BatchCode.contains(pattern.as_str()));
    }

    let total_batches = match LogEntity::find().filter(condition.clone()).count(db).await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProcessingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match LogEntity::find()
        .filter(condition)
        .order_by_desc(LogColumn::StartedAt)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ProcessingListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut stats = ProcessingStats {
        total_batches,
        ..Default::default()
    };
    let mut yield_sum = 0.0;
    let mut yield_count = 0u64;
    for row in &rows {
        stats.total_input += row.input_quantity;
        stats.total_output += row.output_quantity.unwrap_or(0.0);
        if row.ended_at.is_none() {
            stats.open_batches += 1;
        }
        if let Some(y) = row.yield_pct {
            yield_sum += y;
            yield_count += 1;
        }
    }
    if yield_count > 0 {
        stats.avg_yield_pct = Some(yield_sum / yield_count as f64);
    }

    let logs = rows.into_iter().map(ProcessingLogDto::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            ProcessingListResponse { stats, logs },
            "Processing logs retrieved successfully",
        )),
    )
}

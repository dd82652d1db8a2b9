use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::equipment::{
    Column as EquipmentColumn, Entity as EquipmentEntity, EquipmentStatus, Model as EquipmentModel,
};
use sea_orm::{ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use util::filters::FilterParam;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListEquipmentQuery {
    pub status: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct EquipmentDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub status: String,
    pub utilization_pct: f64,
    pub last_maintenance_at: Option<String>,
    pub next_maintenance_at: Option<String>,
}

impl From<EquipmentModel> for EquipmentDto {
    fn from(m: EquipmentModel) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            status: m.status.to_string(),
            utilization_pct: m.utilization_pct,
            last_maintenance_at: m.last_maintenance_at.map(|t| t.to_rfc3339()),
            next_maintenance_at: m.next_maintenance_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct EquipmentStats {
    pub total: u64,
    pub operational: u64,
    pub maintenance: u64,
    pub offline: u64,
    pub avg_utilization_pct: Option<f64>,
}

#[derive(Debug, Serialize, Default)]
pub struct EquipmentListResponse {
    pub stats: EquipmentStats,
    pub equipment: Vec<EquipmentDto>,
}

fn resolve_column(name: &str) -> Result<EquipmentColumn, DbErr> {
    match name {
        "section_id" => Ok(EquipmentColumn::SectionId),
        "status" => Ok(EquipmentColumn::Status),
        "code" => Ok(EquipmentColumn::Code),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/equipment
///
/// Machine list ordered by status then code, with status counts and the
/// average utilization. Stats and the detail list come from one shared
/// condition.
///
/// ### Query Parameters
/// - `status` (optional): `operational`, `maintenance`, or `offline`
/// - `query` (optional): Case-insensitive partial match on name or code
///
/// ### Responses
/// - `200 OK` with `{ stats, equipment }`; empty match is a success
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_equipment(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListEquipmentQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(status) = &query.status {
        params.push(FilterParam::eq("status", status.to_lowercase().as_str()));
    }

    let mut condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<EquipmentListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    if let Some(q) = &query.query {
        let pattern = format!("%{}%", q.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(EquipmentColumn::Name.contains(pattern.as_str()))
                .add(EquipmentColumn::Code.contains(pattern.as_str())),
        );
    }

    let total = match EquipmentEntity::find().filter(condition.clone()).count(db).await {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<EquipmentListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match EquipmentEntity::find()
        .filter(condition)
        .order_by_asc(EquipmentColumn::Status)
        .order_by_asc(EquipmentColumn::Code)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<EquipmentListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut stats = EquipmentStats {
        total,
        ..Default::default()
    };
    let mut util_sum = 0.0;
    for row in &rows {
        util_sum += row.utilization_pct;
        match row.status {
            EquipmentStatus::Operational => stats.operational += 1,
            EquipmentStatus::Maintenance => stats.maintenance += 1,
            EquipmentStatus::Offline => stats.offline += 1,
        }
    }
    if !rows.is_empty() {
        stats.avg_utilization_pct = Some(util_sum / rows.len() as f64);
    }

    let equipment = rows.into_iter().map(EquipmentDto::from).collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            EquipmentListResponse { stats, equipment },
            "Equipment retrieved successfully",
        )),
    )
}

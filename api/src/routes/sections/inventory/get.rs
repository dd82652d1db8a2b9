use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::filter_utils::FilterUtils;
use db::models::inventory_item::{
    AlertStatus, Column as ItemColumn, Entity as ItemEntity, Model as ItemModel,
};
use sea_orm::{
    ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use util::filters::FilterParam;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListInventoryQuery {
    pub category: Option<String>,
    pub alert: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Default)]
pub struct InventoryItemDto {
    pub id: i64,
    pub item_code: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_cost: f64,
    pub reorder_level: f64,
    pub critical_level: f64,
    pub alert_status: AlertStatus,
    pub stock_value: f64,
}

impl From<ItemModel> for InventoryItemDto {
    fn from(item: ItemModel) -> Self {
        let alert_status = item.alert_status();
        let stock_value = item.stock_value();
        Self {
            id: item.id,
            item_code: item.item_code,
            name: item.name,
            category: item.category,
            quantity: item.quantity,
            unit: item.unit,
            unit_cost: item.unit_cost,
            reorder_level: item.reorder_level,
            critical_level: item.critical_level,
            alert_status,
            stock_value,
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct InventoryStats {
    pub total_items: u64,
    pub total_value: f64,
    pub low_stock: u64,
    pub critical: u64,
}

#[derive(Debug, Serialize, Default)]
pub struct InventoryListResponse {
    pub stats: InventoryStats,
    pub items: Vec<InventoryItemDto>,
}

fn resolve_column(name: &str) -> Result<ItemColumn, DbErr> {
    match name {
        "section_id" => Ok(ItemColumn::SectionId),
        "category" => Ok(ItemColumn::Category),
        "name" => Ok(ItemColumn::Name),
        "item_code" => Ok(ItemColumn::ItemCode),
        other => Err(DbErr::Custom(format!("Unknown filter column: {other}"))),
    }
}

/// GET /api/sections/{section_id}/inventory
///
/// Filtered stock list with summary stats. The stats aggregate and the
/// detail list are produced from one shared condition, so the numbers on
/// the summary cards always describe exactly the listed rows.
///
/// ### Query Parameters
/// - `category` (optional): Exact category match
/// - `query` (optional): Case-insensitive partial match on name or item code
/// - `alert` (optional): Narrow the detail list to `ok`, `low_stock`, or
///   `critical`; alert flags are derived from quantity thresholds, so this
///   narrows presentation only and the stats keep counting the full set
///
/// ### Responses
/// - `200 OK` with `{ stats, items }`; an empty match is a success with an
///   empty `items`, never an error
/// - `401 Unauthorized` / `403 Forbidden` - Not assigned to this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn list_inventory(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
    Query(query): Query<ListInventoryQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    // Single shared condition: section scope first, then the optional filters.
    let mut params = vec![FilterParam::eq("section_id", section_id)];
    if let Some(category) = &query.category {
        params.push(FilterParam::eq("category", category.as_str()));
    }

    let mut condition = match FilterUtils::apply_all_filters(&params, resolve_column) {
        Ok(c) => c,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<InventoryListResponse>::error(format!(
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
                .add(ItemColumn::Name.contains(pattern.as_str()))
                .add(ItemColumn::ItemCode.contains(pattern.as_str())),
        );
    }

    let total_items = match ItemEntity::find()
        .filter(condition.clone())
        .count(db)
        .await
    {
        Ok(n) => n,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<InventoryListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let rows = match ItemEntity::find()
        .filter(condition)
        .order_by_asc(ItemColumn::Category)
        .order_by_asc(ItemColumn::Name)
        .all(db)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<InventoryListResponse>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let mut stats = InventoryStats {
        total_items,
        ..Default::default()
    };
    for row in &rows {
        stats.total_value += row.stock_value();
        match row.alert_status() {
            AlertStatus::LowStock => stats.low_stock += 1,
            AlertStatus::Critical => stats.critical += 1,
            AlertStatus::Ok => {}
        }
    }

    let alert_filter = query.alert.as_deref().and_then(|a| AlertStatus::from_str(a).ok());
    let items = rows
        .into_iter()
        .filter(|row| alert_filter.is_none_or(|wanted| row.alert_status() == wanted))
        .map(InventoryItemDto::from)
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(
            InventoryListResponse { stats, items },
            "Inventory retrieved successfully",
        )),
    )
}

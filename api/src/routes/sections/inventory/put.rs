use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::ClientIp;
use crate::routes::sections::inventory::get::InventoryItemDto;
use crate::services::activity::log_activity;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use common::format_validation_errors;
use db::models::inventory_item::{ActiveModel as ItemActiveModel, Model as ItemModel};
use sea_orm::{ActiveModelTrait, ActiveValue::Set};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,

    #[validate(range(min = 0.0, message = "Unit cost cannot be negative"))]
    pub unit_cost: Option<f64>,

    #[validate(range(min = 0.0, message = "Reorder level cannot be negative"))]
    pub reorder_level: Option<f64>,

    #[validate(range(min = 0.0, message = "Critical level cannot be negative"))]
    pub critical_level: Option<f64>,
}

/// PUT /api/sections/{section_id}/inventory/{item_id}
///
/// Edit an item's descriptive fields and thresholds. Quantity changes go
/// through the adjust endpoint so they leave a trail. Requires supervisor
/// or higher within the section.
///
/// ### Responses
/// - `200 OK` with the updated item
/// - `400 Bad Request` (validation failure)
/// - `404 Not Found` - No such item in this section
/// - `500 Internal Server Error`
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path((section_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateItemRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<InventoryItemDto>::error(
                format_validation_errors(&e),
            )),
        );
    }

    let db = app_state.db();

    let item = match ItemModel::find_in_section(db, section_id, item_id).await {
        Ok(Some(item)) => item,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<InventoryItemDto>::error(
                    "Inventory item not found",
                )),
            );
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<InventoryItemDto>::error(format!(
                    "Database error: {}",
                    e
                ))),
            );
        }
    };

    let item_code = item.item_code.clone();
    let mut active: ItemActiveModel = item.into();
    if let Some(name) = req.name {
        active.name = Set(name);
    }
    if let Some(category) = req.category {
        active.category = Set(category);
    }
    if let Some(unit_cost) = req.unit_cost {
        active.unit_cost = Set(unit_cost);
    }
    if let Some(reorder_level) = req.reorder_level {
        active.reorder_level = Set(reorder_level);
    }
    if let Some(critical_level) = req.critical_level {
        active.critical_level = Set(critical_level);
    }
    active.updated_at = Set(Utc::now());

    match active.update(db).await {
        Ok(updated) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "inventory",
                "update",
                format!("Updated item '{}' in section {}", item_code, section_id),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    InventoryItemDto::from(updated),
                    "Inventory item updated successfully",
                )),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<InventoryItemDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

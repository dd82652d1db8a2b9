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
use common::format_validation_errors;
use db::models::inventory_item::Model as ItemModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "Item code is required"))]
    pub item_code: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 0.0, message = "Quantity cannot be negative"))]
    pub quantity: f64,

    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,

    #[validate(range(min = 0.0, message = "Unit cost cannot be negative"))]
    pub unit_cost: f64,

    #[serde(default)]
    pub reorder_level: f64,

    #[serde(default)]
    pub critical_level: f64,
}

/// POST /api/sections/{section_id}/inventory
///
/// Register a new stocked item in this section. Requires supervisor or
/// higher within the section.
///
/// ### Responses
/// - `201 Created` with the item
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (duplicate item code)
/// - `500 Internal Server Error`
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path(section_id): Path<i64>,
    Json(req): Json<CreateItemRequest>,
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

    match ItemModel::create(
        db,
        section_id,
        &req.item_code,
        &req.name,
        &req.category,
        req.quantity,
        &req.unit,
        req.unit_cost,
        req.reorder_level,
        req.critical_level,
    )
    .await
    {
        Ok(item) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "inventory",
                "create",
                format!("Added item '{}' to section {}", item.item_code, section_id),
                ip.as_string(),
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    InventoryItemDto::from(item),
                    "Inventory item created successfully",
                )),
            )
        }
        Err(e) => {
            if e.to_string().contains("inventory_items.item_code") {
                return (
                    StatusCode::CONFLICT,
                    Json(ApiResponse::<InventoryItemDto>::error(
                        "An item with this code already exists",
                    )),
                );
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<InventoryItemDto>::error(format!(
                    "Database error: {}",
                    e
                ))),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    /// Signed delta; receipts are positive, issues negative.
    pub delta: f64,
    pub reason: Option<String>,
}

/// POST /api/sections/{section_id}/inventory/{item_id}/adjust
///
/// Applies a signed quantity delta to one item. The resulting quantity is
/// clamped at zero. Any assigned role may adjust stock; the adjustment is
/// written to the activity trail with its reason.
///
/// ### Request Body
/// ```json
/// { "delta": -25.0, "reason": "issued to processing" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated item
/// - `404 Not Found` - No such item in this section
/// - `500 Internal Server Error`
pub async fn adjust_quantity(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
    Path((section_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<AdjustQuantityRequest>,
) -> impl IntoResponse {
    let db = app_state.db();

    match ItemModel::adjust_quantity(db, section_id, item_id, req.delta).await {
        Ok(item) => {
            log_activity(
                app_state.db_clone(),
                claims.sub,
                "inventory",
                "adjust",
                format!(
                    "Adjusted '{}' by {} ({})",
                    item.item_code,
                    req.delta,
                    req.reason.as_deref().unwrap_or("no reason given")
                ),
                ip.as_string(),
            );
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    InventoryItemDto::from(item),
                    "Quantity adjusted successfully",
                )),
            )
        }
        Err(sea_orm::DbErr::RecordNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<InventoryItemDto>::error(
                "Inventory item not found",
            )),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<InventoryItemDto>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

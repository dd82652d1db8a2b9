use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::format_currency;
use crate::routes::reports::common::{build_financial_report, escape_html};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use db::models::processing_log::{Column as LogColumn, Entity as LogEntity};
use db::models::user::Model as UserModel;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use util::state::AppState;

// The print views return ordinary HTML with an auto print() trigger. The
// "PDF" is whatever the reader's print dialog produces; the server never
// claims a PDF content type.

fn html_response(body: String) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    (StatusCode::OK, (headers, body))
}

fn print_page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; margin-top: 1rem; }}\n\
         th, td {{ border: 1px solid #999; padding: 4px 8px; text-align: left; }}\n\
         .num {{ text-align: right; }}\n\
         </style>\n</head>\n<body>\n{}\n<script>window.print();</script>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// GET /api/reports/sections/{section_id}/financial/print
///
/// Print view of the section's financial report: the same aggregate and
/// detail data as the CSV export rendered as an HTML table that opens the
/// browser's print dialog.
///
/// ### Responses
/// - `200 OK` with a `text/html` body
/// - `403 Forbidden` - Not supervisor in this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn financial_print(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
) -> axum::response::Response {
    let db = app_state.db();

    let report = match build_financial_report(db, section_id).await {
        Ok(Some(report)) => report,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error(format!(
                    "Section {} not found.",
                    section_id
                ))),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
            )
                .into_response();
        }
    };

    let mut body = format!(
        "<h1>Financial Report - {}</h1>\n<p>Generated {}</p>\n\
         <h2>Summary</h2>\n<table>\n\
         <tr><th>Total Items</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Total Stock Value</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Low Stock Items</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Critical Items</th><td class=\"num\">{}</td></tr>\n\
         </table>\n",
        escape_html(&report.section_name),
        report.generated_at.to_rfc3339(),
        report.total_items,
        escape_html(&format_currency(report.total_value)),
        report.low_stock,
        report.critical,
    );

    body.push_str("<h2>Breakdown by Category</h2>\n<table>\n<tr><th>Category</th><th>Items</th><th>Quantity</th><th>Stock Value</th></tr>\n");
    for cat in &report.categories {
        body.push_str(&format!(
            "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{:.2}</td><td class=\"num\">{}</td></tr>\n",
            escape_html(&cat.category),
            cat.items,
            cat.quantity,
            escape_html(&format_currency(cat.value)),
        ));
    }
    body.push_str("</table>\n");

    body.push_str("<h2>Detail</h2>\n<table>\n<tr><th>Item Code</th><th>Name</th><th>Category</th><th>Quantity</th><th>Unit</th><th>Unit Cost</th><th>Stock Value</th><th>Alert</th></tr>\n");
    for row in &report.details {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{:.2}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td>{}</td></tr>\n",
            escape_html(&row.item_code),
            escape_html(&row.name),
            escape_html(&row.category),
            row.quantity,
            escape_html(&row.unit),
            escape_html(&format_currency(row.unit_cost)),
            escape_html(&format_currency(row.stock_value)),
            row.alert,
        ));
    }
    body.push_str("</table>\n");

    html_response(print_page(
        &format!("Financial Report - {}", report.section_name),
        &body,
    ))
    .into_response()
}

#[derive(Debug, Deserialize)]
pub struct InvoiceQuery {
    /// Billing rate per output unit, in rupees.
    pub rate: Option<f64>,
}

/// GET /api/reports/invoices/{log_id}/print
///
/// Invoice-style print view for one processed batch: quantities, yield,
/// and the chargeable amount at the given per-unit rate. The caller must
/// be an admin or hold a role in the batch's section.
///
/// ### Query Parameters
/// - `rate` (optional): Billing rate per output unit (default 0)
///
/// ### Responses
/// - `200 OK` with a `text/html` body
/// - `403 Forbidden` - Caller has no role in the batch's section
/// - `404 Not Found` - Unknown batch
/// - `500 Internal Server Error` - Database error
pub async fn invoice_print(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(log_id): Path<i64>,
    Query(query): Query<InvoiceQuery>,
) -> axum::response::Response {
    let db = app_state.db();

    let log = match LogEntity::find()
        .filter(LogColumn::Id.eq(log_id))
        .one(db)
        .await
    {
        Ok(Some(log)) => log,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Processing log not found")),
            )
                .into_response();
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Database error: {}", e))),
            )
                .into_response();
        }
    };

    if !claims.admin {
        let assigned = UserModel::is_assigned_to_section(db, claims.sub, log.section_id)
            .await
            .unwrap_or(false);
        if !assigned {
            return (
                StatusCode::FORBIDDEN,
                Json(ApiResponse::<()>::error(
                    "Not assigned to this batch's section",
                )),
            )
                .into_response();
        }
    }

    let rate = query.rate.unwrap_or(0.0);
    let output = log.output_quantity.unwrap_or(0.0);
    let amount = output * rate;

    let body = format!(
        "<h1>Invoice - Batch {}</h1>\n<p>Generated {}</p>\n\
         <table>\n\
         <tr><th>Product</th><td>{}</td></tr>\n\
         <tr><th>Batch Code</th><td>{}</td></tr>\n\
         <tr><th>Input Quantity</th><td class=\"num\">{:.2}</td></tr>\n\
         <tr><th>Output Quantity</th><td class=\"num\">{:.2}</td></tr>\n\
         <tr><th>Yield</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Rate per Unit</th><td class=\"num\">{}</td></tr>\n\
         <tr><th>Amount Due</th><td class=\"num\">{}</td></tr>\n\
         </table>\n",
        escape_html(&log.batch_code),
        chrono::Utc::now().to_rfc3339(),
        escape_html(&log.product),
        escape_html(&log.batch_code),
        log.input_quantity,
        output,
        log.yield_pct
            .map(|y| format!("{:.2}%", y))
            .unwrap_or_else(|| "-".to_string()),
        escape_html(&format_currency(rate)),
        escape_html(&format_currency(amount)),
    );

    html_response(print_page(&format!("Invoice - Batch {}", log.batch_code), &body)).into_response()
}

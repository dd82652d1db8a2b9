use crate::response::ApiResponse;
use crate::routes::common::format_currency;
use crate::routes::reports::common::build_financial_report;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use util::state::AppState;

/// UTF-8 byte order mark; spreadsheet tools key their encoding detection
/// off these first three bytes.
const BOM: &str = "\u{feff}";

/// Quotes a field when it contains a comma, quote, or newline; embedded
/// quotes are doubled.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: &[String]) {
    out.push_str(
        &fields
            .iter()
            .map(|f| csv_escape(f))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
}

/// GET /api/reports/sections/{section_id}/financial.csv
///
/// Stock valuation export for one section. Requires supervisor or higher
/// within the section.
///
/// The file is UTF-8 with a BOM and carries four logical sections
/// separated by blank lines: report header, summary stats, per-category
/// breakdown, then the detail rows. Currency cells keep the human-readable
/// `Rs. N.NN` shape downstream spreadsheets already expect.
///
/// ### Responses
/// - `200 OK` with a `text/csv` file attachment
/// - `403 Forbidden` - Not supervisor in this section
/// - `404 Not Found` - Unknown section
/// - `500 Internal Server Error` - Database error
pub async fn financial_csv(
    State(app_state): State<AppState>,
    Path(section_id): Path<i64>,
) -> impl IntoResponse {
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

    let mut csv = String::from(BOM);
    push_row(&mut csv, &[format!("Financial Report - {}", report.section_name)]);
    push_row(
        &mut csv,
        &["Generated".to_string(), report.generated_at.to_rfc3339()],
    );
    csv.push('\n');

    push_row(&mut csv, &["Summary".to_string()]);
    push_row(
        &mut csv,
        &["Total Items".to_string(), report.total_items.to_string()],
    );
    push_row(
        &mut csv,
        &[
            "Total Stock Value".to_string(),
            format_currency(report.total_value),
        ],
    );
    push_row(
        &mut csv,
        &["Low Stock Items".to_string(), report.low_stock.to_string()],
    );
    push_row(
        &mut csv,
        &["Critical Items".to_string(), report.critical.to_string()],
    );
    csv.push('\n');

    push_row(&mut csv, &["Breakdown by Category".to_string()]);
    push_row(
        &mut csv,
        &[
            "Category".to_string(),
            "Items".to_string(),
            "Quantity".to_string(),
            "Stock Value".to_string(),
        ],
    );
    for cat in &report.categories {
        push_row(
            &mut csv,
            &[
                cat.category.clone(),
                cat.items.to_string(),
                format!("{:.2}", cat.quantity),
                format_currency(cat.value),
            ],
        );
    }
    csv.push('\n');

    push_row(&mut csv, &["Detail".to_string()]);
    push_row(
        &mut csv,
        &[
            "Item Code".to_string(),
            "Name".to_string(),
            "Category".to_string(),
            "Quantity".to_string(),
            "Unit".to_string(),
            "Unit Cost".to_string(),
            "Stock Value".to_string(),
            "Alert".to_string(),
        ],
    );
    for row in &report.details {
        push_row(
            &mut csv,
            &[
                row.item_code.clone(),
                row.name.clone(),
                row.category.clone(),
                format!("{:.2}", row.quantity),
                row.unit.clone(),
                format_currency(row.unit_cost),
                format_currency(row.stock_value),
                row.alert.to_string(),
            ],
        );
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"financial-section-{}.csv\"",
            section_id
        ))
        .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, (headers, csv)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_and_commas() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

//! # Reports Routes Module
//!
//! Three output shapes over the same aggregate + detail data: a sectioned
//! CSV export, print-view HTML (the deliberate print-to-PDF shortcut), and
//! a streamed SQL backup of the whole database.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated, allow_supervisor};

pub mod backup;
pub mod common;
pub mod csv;
pub mod print;

/// Builds and returns the `/reports` route group.
///
/// Routes:
/// - `GET /reports/sections/{section_id}/financial.csv` → CSV export (supervisor+)
/// - `GET /reports/sections/{section_id}/financial/print` → print view (supervisor+)
/// - `GET /reports/invoices/{log_id}/print` → batch invoice print view (authenticated;
///   handler checks the batch's section assignment)
/// - `GET /reports/backup.sql` → streamed SQL dump (admin only)
pub fn reports_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/sections/{section_id}/financial.csv",
            get(csv::financial_csv)
                .route_layer(from_fn_with_state(app_state.clone(), allow_supervisor)),
        )
        .route(
            "/sections/{section_id}/financial/print",
            get(print::financial_print)
                .route_layer(from_fn_with_state(app_state, allow_supervisor)),
        )
        .route(
            "/invoices/{log_id}/print",
            get(print::invoice_print).route_layer(from_fn(allow_authenticated)),
        )
        .route(
            "/backup.sql",
            get(backup::download_backup).route_layer(from_fn(allow_admin)),
        )
}

use crate::auth::claims::AuthUser;
use crate::routes::common::ClientIp;
use crate::services::activity::log_activity;
use crate::services::backup::sql_dump_stream;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use util::state::AppState;

/// GET /api/reports/backup.sql
///
/// Streams a full SQL dump of the database as an attachment. Admin only.
///
/// Statements are produced table-by-table, row-by-row and flow through a
/// bounded channel straight into the response body, so the dump never
/// materializes in memory and works for any database size.
///
/// ### Responses
/// - `200 OK` with an `application/sql` attachment
/// - `401 Unauthorized` / `403 Forbidden` - Not an admin
pub async fn download_backup(
    State(app_state): State<AppState>,
    AuthUser(claims): AuthUser,
    ip: ClientIp,
) -> impl IntoResponse {
    let rx = sql_dump_stream(app_state.db());

    log_activity(
        app_state.db_clone(),
        claims.sub,
        "reports",
        "backup",
        "Downloaded SQL backup".to_string(),
        ip.as_string(),
    );

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/sql"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"backup.sql\""),
    );

    (StatusCode::OK, headers, Body::from_stream(stream))
}

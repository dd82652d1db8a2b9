use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use include_dir::{Dir, include_dir};

static ASSETS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// GET /api/chat/widget.js
///
/// Serves the embedded chat widget script. Pages include it with a plain
/// `<script>` tag; the script owns the whole panel lifecycle and talks to
/// `POST /api/chat/reply`.
pub async fn widget_script() -> impl IntoResponse {
    let Some(file) = ASSETS.get_file("chat_widget.js") else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/javascript; charset=utf-8"),
    );

    (StatusCode::OK, headers, file.contents()).into_response()
}

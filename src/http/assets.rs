//! Management console asset serving.
//!
//! Serves the built frontend: `index.html` at the root, and only
//! allowlisted static file types anywhere else. Arbitrary paths never
//! fall back to `index.html`, and the proxy/management prefixes never
//! reach the filesystem.

use std::path::Path;

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::http::server::AppState;

/// File extensions the asset handler will serve.
pub const ALLOWED_STATIC_EXTENSIONS: &[&str] = &[
    "js", "css", "map", "jpg", "jpeg", "png", "gif", "svg", "ico", "woff", "woff2", "ttf", "eot",
    "json", "webp",
];

const FALLBACK_PAGE: &str = "<h1>Frontend not built yet</h1>\
<p>Build the management console and point [frontend].dir at it.</p>";

/// `GET /` — the console entry point.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    let index = Path::new(&state.config.frontend.dir).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => Html(FALLBACK_PAGE.to_string()).into_response(),
    }
}

/// Fallback route — static assets only, everything else is 404.
pub async fn serve_asset(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Internal prefixes and traversal segments never hit the filesystem.
    if path.starts_with("proxy/")
        || path.starts_with("_rproxy/")
        || path.split('/').any(|segment| segment == "..")
    {
        return StatusCode::NOT_FOUND.into_response();
    }

    let full_path = Path::new(&state.config.frontend.dir).join(path);
    let allowed = full_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_STATIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !allowed {
        return StatusCode::NOT_FOUND.into_response();
    }

    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&full_path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

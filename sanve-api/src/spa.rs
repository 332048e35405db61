use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Serves the built single-page application, falling back to the index
/// document for unknown paths so client-side routing keeps working.
pub fn static_service(static_dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(static_dir).join("index.html");
    ServeDir::new(static_dir).fallback(ServeFile::new(index))
}

/// GET /admin/login
///
/// The admin portal is only reachable through its dedicated subdomain;
/// anything else is bounced to the public storefront.
pub async fn admin_portal(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default()
        .trim();

    if host != state.site.admin_host {
        return (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response();
    }

    let index = Path::new(&state.site.static_dir).join("index.html");
    match tokio::fs::read_to_string(&index).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to read index document: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

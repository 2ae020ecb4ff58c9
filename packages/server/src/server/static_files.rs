use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::server::error::ApiError;

// Embedded at compile time from packages/server/assets
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Serve the submission form
pub async fn serve_index() -> Response {
    serve_embedded("index.html")
}

/// Serve any other embedded asset under `/assets/`
pub async fn serve_asset(Path(path): Path<String>) -> Response {
    serve_embedded(path.trim_start_matches('/'))
}

fn serve_embedded(path: &str) -> Response {
    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => ApiError::NotFound.into_response(),
    }
}

use axum::{
    body::Body,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::pages;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Asset;

/// `GET /static/{*path}`
pub async fn serve_static(Path(path): Path<String>) -> Response {
    match Asset::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, "public, max-age=3600"),
                ],
                Body::from(content.data),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            axum::response::Html(pages::error_page(404, "Asset not found")),
        )
            .into_response(),
    }
}

//! Static file server over a generated output directory.

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Create the static server router.
///
/// Directory requests fall back to their `index.html`; anything unresolvable
/// is answered with the generated `404/index.html` document.
pub fn create_router(output_dir: &Path) -> Router {
    let not_found = ServeFile::new(output_dir.join("404").join("index.html"));
    let service = ServeDir::new(output_dir).not_found_service(not_found);

    Router::new().fallback_service(service)
}

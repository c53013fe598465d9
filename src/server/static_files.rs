//! Serve the browser client from a directory (HOLONET_CLIENT_DIR) when it exists.

use std::path::Path;

use axum::handler::HandlerWithoutStateExt;
use axum::Router;
use tower_http::services::ServeDir;
use tracing::info;

use super::routes::route_not_found;
use super::SharedService;

/// Use the client directory as the router fallback. Missing files, and every
/// path when there is no client directory, get the JSON 404 envelope.
pub fn attach_client_dir(
    router: Router<SharedService>,
    client_dir: Option<&Path>,
) -> Router<SharedService> {
    match client_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => {
            info!(dir = %dir.display(), "serving client files");
            let files = ServeDir::new(dir)
                .append_index_html_on_directories(true)
                .not_found_service(route_not_found.into_service());
            router.fallback_service(files)
        }
        None => router.fallback(route_not_found),
    }
}

//! Feed endpoint server.
//!
//! Exposes the project feed at `/projects/rss.xml` and falls back to static
//! files from the build output directory. The content store is loaded once
//! at startup; there are no concurrent writers.

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use folio_core::Post;
use folio_generator::FeedGenerator;
use tower_http::services::ServeDir;

/// State shared with the feed handler.
pub struct ServerState {
    /// Feed generator configured for this site.
    pub generator: FeedGenerator,

    /// Validated project records, in collection order.
    pub projects: Vec<Post>,
}

/// Create the server router.
pub fn create_router(output_dir: &Path, state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/projects/rss.xml", get(feed_handler))
        .fallback_service(ServeDir::new(output_dir))
        .with_state(state)
}

/// Serve the project feed. Any generation failure fails the whole request;
/// there is no partial feed.
async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.generator.generate(&state.projects) {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/rss+xml")], xml).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "feed generation failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

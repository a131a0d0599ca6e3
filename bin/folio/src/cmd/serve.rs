//! Serve command - feed endpoint plus static output

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{ContentCollector, FeedGenerator};

use crate::server::{ServerState, create_router};

/// Run the serve command.
///
/// Loads the content store once, then serves the project feed at
/// `/projects/rss.xml` alongside static files from the output directory.
pub async fn run(config_path: &Path, port: u16) -> Result<()> {
    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    let store = ContentCollector::new(config.clone()).collect();
    for failure in &store.errors {
        println!("  ✗ {}: {}", failure.path.display(), failure.source);
    }

    let state = Arc::new(ServerState {
        generator: FeedGenerator::new(config.clone()),
        projects: store.projects,
    });

    let app = create_router(Path::new(&config.build.output_dir), state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .wrap_err("Failed to bind server port")?;

    println!("  Serving on http://127.0.0.1:{port}");
    println!("  Feed at   http://127.0.0.1:{port}/projects/rss.xml");
    tracing::info!(port, "server started");

    axum::serve(listener, app).await.wrap_err("Server failed")?;

    Ok(())
}

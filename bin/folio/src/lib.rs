//! Folio CLI Library
//!
//! Command implementations for the folio binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, build, serve)
//! - [`server`] - Feed endpoint server

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use folio_core::{Config, Post, Series};
pub use folio_generator::{ContentCollector, ContentStore, FeedGenerator};

/// Initialize tracing with the specified verbosity level.
///
/// `verbose` maps 0 to WARN, 1 to INFO, 2 to DEBUG and anything higher to
/// TRACE; `RUST_LOG` directives still apply on top.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

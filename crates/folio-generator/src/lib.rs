//! Folio Generator Library
//!
//! Content collection and feed generation for the folio content engine.
//!
//! # Modules
//!
//! - [`collector`] - Content collection and the query surface over it
//! - [`feed`] - RSS feed generation
//! - [`images`] - Disk-backed image resolution

pub mod collector;
pub mod feed;
pub mod images;

pub use collector::{ContentCollector, ContentStore, LoadError};
pub use feed::FeedGenerator;
pub use images::DiskResolver;

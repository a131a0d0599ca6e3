//! Folio Core Library
//!
//! Content schemas, site configuration, and error handling for the folio
//! portfolio/blog content engine.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod image;
pub mod post;
pub mod schema;
pub mod series;

pub use config::{Config, MenuLink, SiteConfig};
pub use error::{CoreError, Result};
pub use image::{ImageRef, ImageResolver, PassthroughResolver};
pub use post::{CoverImage, HeroImage, Post};
pub use schema::{FieldError, SchemaErrors};
pub use series::Series;

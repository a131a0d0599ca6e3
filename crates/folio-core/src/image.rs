//! Image resolution capability.
//!
//! Front matter declares images by their source string; turning that string
//! into something usable (and checking it points at a real asset) belongs to
//! the surrounding build pipeline. The schema layer only requires that a
//! resolver exists, and folds resolution failures into the record's field
//! errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resolved image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Resolved source path or URL, usable as `src` in templates.
    pub src: String,

    /// Pixel width, when known.
    #[serde(default)]
    pub width: Option<u32>,

    /// Pixel height, when known.
    #[serde(default)]
    pub height: Option<u32>,

    /// Image format, when known (e.g. `webp`).
    #[serde(default)]
    pub format: Option<String>,
}

impl ImageRef {
    /// Reference with only a source, no known metadata.
    pub fn bare(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            width: None,
            height: None,
            format: None,
        }
    }
}

/// Image resolution failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ResolveError(pub String);

/// Capability for resolving declared image sources.
pub trait ImageResolver {
    /// Resolve a declared `src` into an [`ImageRef`].
    fn resolve(&self, src: &str) -> Result<ImageRef, ResolveError>;
}

/// Resolver that accepts every source unchanged. Useful in tests and for
/// callers that defer asset handling entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughResolver;

impl ImageResolver for PassthroughResolver {
    fn resolve(&self, src: &str) -> Result<ImageRef, ResolveError> {
        Ok(ImageRef::bare(src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_keeps_source() {
        let image = PassthroughResolver.resolve("./cover.png").expect("resolve");
        assert_eq!(image.src, "./cover.png");
        assert!(image.width.is_none());
        assert!(image.height.is_none());
    }
}

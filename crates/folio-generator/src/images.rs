//! Disk-backed image resolution.

use std::path::PathBuf;

use folio_core::image::{ImageRef, ImageResolver, ResolveError};

/// Resolver that checks declared image sources against files on disk.
///
/// Relative sources (`./cover.png`) are resolved against the content root;
/// absolute http(s) URLs pass through untouched.
#[derive(Debug, Clone)]
pub struct DiskResolver {
    root: PathBuf,
}

impl DiskResolver {
    /// Create a resolver rooted at the content directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageResolver for DiskResolver {
    fn resolve(&self, src: &str) -> Result<ImageRef, ResolveError> {
        if src.starts_with("http://") || src.starts_with("https://") {
            return Ok(ImageRef::bare(src));
        }

        let relative = src.trim_start_matches("./").trim_start_matches('/');
        let path = self.root.join(relative);
        if !path.is_file() {
            return Err(ResolveError(format!("no such file: {}", path.display())));
        }

        let format = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        Ok(ImageRef {
            src: src.to_string(),
            width: None,
            height: None,
            format,
        })
    }
}

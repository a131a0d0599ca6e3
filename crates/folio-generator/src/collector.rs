//! Content collection.
//!
//! Walks the per-kind content directories, validates each file's front
//! matter, and collects the typed records into a [`ContentStore`]. A record
//! that fails validation is reported and skipped; its siblings still load.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use folio_core::{Config, CoreError, ImageResolver, Post, Series, frontmatter::parse_raw};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::images::DiskResolver;

/// A single content file that failed to load.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct LoadError {
    /// Source file that failed.
    pub path: PathBuf,

    /// What went wrong.
    #[source]
    pub source: CoreError,
}

/// All validated content, plus the per-file failures encountered loading it.
///
/// Immutable after [`ContentCollector::collect`] returns; consumers only
/// query it.
#[derive(Debug, Default)]
pub struct ContentStore {
    /// Blog posts, in file-path order.
    pub posts: Vec<Post>,

    /// Project records (post-shaped), in file-path order.
    pub projects: Vec<Post>,

    /// Series records, first occurrence per id.
    pub series: Vec<Series>,

    /// Files that failed validation. Never aborts the batch.
    pub errors: Vec<LoadError>,
}

impl ContentStore {
    /// Posts sorted newest first by publish date; ties break on id.
    pub fn posts_by_date(&self) -> Vec<&Post> {
        let mut posts: Vec<_> = self.posts.iter().collect();
        posts.sort_by(|a, b| {
            b.publish_date
                .cmp(&a.publish_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        posts
    }

    /// Posts belonging to a series, sorted by `orderInSeries` (records
    /// without an order sort last, keeping their input order).
    pub fn series_posts(&self, series_id: &str) -> Vec<&Post> {
        let mut posts: Vec<_> = self
            .posts
            .iter()
            .filter(|p| p.series_id.as_deref() == Some(series_id))
            .collect();
        posts.sort_by(|a, b| match (a.order_in_series, b.order_in_series) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        posts
    }

    /// Look up a series by its declared id.
    pub fn series_by_id(&self, id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == id)
    }

    /// Series marked for promotional surfacing.
    pub fn featured_series(&self) -> Vec<&Series> {
        self.series.iter().filter(|s| s.featured).collect()
    }

    /// Sorted union of all post tags.
    pub fn unique_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .posts
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        tags.sort();
        tags
    }
}

/// Content collector that walks per-kind directories and validates files.
pub struct ContentCollector {
    config: Config,
    images: Box<dyn ImageResolver + Send + Sync>,
}

impl ContentCollector {
    /// Create a collector resolving images against the content root.
    pub fn new(config: Config) -> Self {
        let resolver = DiskResolver::new(&config.content.root);
        Self {
            config,
            images: Box::new(resolver),
        }
    }

    /// Replace the image resolver.
    pub fn with_resolver(mut self, images: Box<dyn ImageResolver + Send + Sync>) -> Self {
        self.images = images;
        self
    }

    /// Collect and validate all content.
    pub fn collect(&self) -> ContentStore {
        let root = Path::new(&self.config.content.root);
        info!(dir = %root.display(), "collecting content");

        let mut store = ContentStore::default();

        let (posts, errors) = self.load_posts(&root.join(&self.config.content.post_dir));
        store.posts = posts;
        store.errors.extend(errors);

        let (projects, errors) = self.load_posts(&root.join(&self.config.content.project_dir));
        store.projects = projects;
        store.errors.extend(errors);

        let (series, errors) = self.load_series(&root.join(&self.config.content.series_dir));
        store.series = series;
        store.errors.extend(errors);

        // Soft references only: a dangling seriesId gets a warning, never an
        // error. Downstream policy is up to the renderer.
        let known: HashSet<&str> = store.series.iter().map(|s| s.id.as_str()).collect();
        for post in &store.posts {
            if let Some(series_id) = post.series_id.as_deref()
                && !known.contains(series_id)
            {
                warn!(post = %post.id, series_id, "post references unknown series");
            }
        }

        info!(
            posts = store.posts.len(),
            projects = store.projects.len(),
            series = store.series.len(),
            errors = store.errors.len(),
            "content collection complete"
        );

        store
    }

    /// Load one post-shaped collection directory.
    fn load_posts(&self, dir: &Path) -> (Vec<Post>, Vec<LoadError>) {
        let files = find_content_files(dir);

        let results: Vec<_> = files
            .par_iter()
            .map(|path| self.load_post(dir, path))
            .collect();

        let mut posts = Vec::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(post) => {
                    if post.draft && !self.config.build.drafts {
                        debug!(id = %post.id, "skipping draft");
                    } else {
                        posts.push(post);
                    }
                }
                Err(e) => {
                    warn!(path = %e.path.display(), error = %e.source, "failed to load record");
                    errors.push(e);
                }
            }
        }
        (posts, errors)
    }

    fn load_post(&self, base: &Path, path: &Path) -> Result<Post, LoadError> {
        debug!(path = %path.display(), "loading record");

        let content = fs::read_to_string(path).map_err(|e| LoadError {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        let (raw, _body) = parse_raw(&content, path).map_err(|e| LoadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let id = record_id(path.strip_prefix(base).unwrap_or(path));
        Post::from_raw(id, &raw, self.images.as_ref()).map_err(|errors| LoadError {
            path: path.to_path_buf(),
            source: CoreError::schema(path, errors),
        })
    }

    /// Load the series collection directory.
    fn load_series(&self, dir: &Path) -> (Vec<Series>, Vec<LoadError>) {
        let files = find_content_files(dir);

        let results: Vec<_> = files
            .par_iter()
            .map(|path| {
                let content = fs::read_to_string(path).map_err(|e| LoadError {
                    path: path.to_path_buf(),
                    source: e.into(),
                })?;
                let (raw, _body) = parse_raw(&content, path).map_err(|e| LoadError {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                Series::from_raw(&raw).map_err(|errors| LoadError {
                    path: path.to_path_buf(),
                    source: CoreError::schema(path, errors),
                })
            })
            .collect();

        let mut series: Vec<Series> = Vec::new();
        let mut seen = HashSet::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(record) => {
                    // Declared ids must be unique; first record wins.
                    if seen.insert(record.id.clone()) {
                        series.push(record);
                    } else {
                        warn!(id = %record.id, "duplicate series id, keeping first");
                    }
                }
                Err(e) => {
                    warn!(path = %e.path.display(), error = %e.source, "failed to load series");
                    errors.push(e);
                }
            }
        }
        (series, errors)
    }
}

/// Find all content files under a directory, in sorted path order so loading
/// is deterministic.
fn find_content_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            !e.file_name()
                .to_string_lossy()
                .starts_with('.')
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("md") | Some("mdx")
            )
        })
        .collect();
    files.sort();
    files
}

/// Derive a record id from a file path relative to its collection directory.
///
/// The extension is dropped and `index.*` collapses to its parent directory,
/// so `hello.md`, `hello/index.md` and `2024/hello.md` become `hello`,
/// `hello` and `2024/hello`.
fn record_id(relative: &Path) -> String {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parent = relative
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    let id = if stem == "index" && !parent.is_empty() {
        parent
    } else if parent.is_empty() {
        stem
    } else {
        format!("{parent}/{stem}")
    };
    id.trim_matches('/').to_string()
}

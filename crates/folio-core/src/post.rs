//! Post record schema.
//!
//! A post is the primary content kind of the site; the `project` collection
//! shares this schema. Validation reads the raw front matter mapping through
//! a [`RecordReader`], so a malformed record reports every failed field at
//! once.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::image::{ImageRef, ImageResolver};
use crate::schema::{RecordReader, SchemaErrors, canonicalize_tags};

/// Maximum post title length, in characters.
pub const TITLE_MAX_CHARS: usize = 60;

const KNOWN_KEYS: &[&str] = &[
    "title",
    "description",
    "coverImage",
    "draft",
    "ogImage",
    "tags",
    "language",
    "heroImage",
    "publishDate",
    "updatedDate",
    "seriesId",
    "orderInSeries",
];

/// Cover image for social/listing surfaces. Both fields are required when
/// the structure is present at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverImage {
    pub alt: String,
    pub src: ImageRef,
}

/// Hero image rendered at the top of a post. Only `src` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    pub src: ImageRef,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub infer_size: Option<bool>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A validated blog post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Record identifier, derived from the source file path.
    pub id: String,

    /// Post title, at most [`TITLE_MAX_CHARS`] characters.
    pub title: String,

    /// Summary used for meta tags and listings.
    pub description: String,

    /// Optional cover image.
    #[serde(default)]
    pub cover_image: Option<CoverImage>,

    /// Whether this post is a draft. Defaults to `false`.
    #[serde(default)]
    pub draft: bool,

    /// External share-image URL.
    #[serde(default)]
    pub og_image: Option<String>,

    /// Canonicalized tags: lowercase, case-insensitively unique.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Content language override.
    #[serde(default)]
    pub language: Option<String>,

    /// Optional hero image.
    #[serde(default)]
    pub hero_image: Option<HeroImage>,

    /// Publication date.
    pub publish_date: DateTime<Utc>,

    /// Last update date. Absent stays absent.
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,

    /// Soft reference to a series id. Dangling references are not an error.
    #[serde(default)]
    pub series_id: Option<String>,

    /// Sort key among posts sharing the same series.
    #[serde(default)]
    pub order_in_series: Option<f64>,

    /// Unknown front matter keys, preserved as-is.
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

impl Post {
    /// Validate a raw front matter record into a post.
    ///
    /// `id` is the record identifier derived from the file path by the
    /// caller; `images` resolves declared image sources. On failure the
    /// returned [`SchemaErrors`] lists every field that failed.
    pub fn from_raw(
        id: impl Into<String>,
        raw: &Value,
        images: &dyn ImageResolver,
    ) -> Result<Self, SchemaErrors> {
        let mut reader = RecordReader::new(raw);

        let title = reader.require_string("title").and_then(|t| {
            let chars = t.chars().count();
            if chars > TITLE_MAX_CHARS {
                reader.fail(
                    "title",
                    format!("string of at most {TITLE_MAX_CHARS} characters"),
                    format!("string of {chars} characters"),
                );
                None
            } else {
                Some(t)
            }
        });

        let description = reader.require_string("description");

        let cover_image = match reader.optional_mapping("coverImage") {
            Some(mut inner) => {
                let alt = inner.require_string("alt");
                let src = resolve_image(&mut inner, images);
                let built = match (alt, src) {
                    (Some(alt), Some(src)) => Some(CoverImage { alt, src }),
                    _ => None,
                };
                reader.merge(inner);
                built
            }
            None => None,
        };

        let draft = reader.bool_or("draft", false);
        let og_image = reader.optional_string("ogImage");

        // Tag pipeline, two explicit stages: default absent to the empty
        // list, then canonicalize unconditionally.
        let tags = reader.string_list_or_default("tags");
        let tags = canonicalize_tags(tags);

        let language = reader.optional_string("language");

        let hero_image = match reader.optional_mapping("heroImage") {
            Some(mut inner) => {
                let src = resolve_image(&mut inner, images);
                let alt = inner.optional_string("alt");
                let infer_size = inner.optional_bool("inferSize");
                let width = inner.optional_u32("width");
                let height = inner.optional_u32("height");
                let color = inner.optional_string("color");
                let built = src.map(|src| HeroImage {
                    src,
                    alt,
                    infer_size,
                    width,
                    height,
                    color,
                });
                reader.merge(inner);
                built
            }
            None => None,
        };

        let publish_date = reader.require_date("publishDate");
        let updated_date = reader.optional_date("updatedDate");
        let series_id = reader.optional_string("seriesId");
        let order_in_series = reader.optional_number("orderInSeries");

        let extra = reader.extra_fields(KNOWN_KEYS);
        let errors = reader.into_errors();

        match (title, description, publish_date) {
            (Some(title), Some(description), Some(publish_date)) if errors.is_empty() => Ok(Self {
                id: id.into(),
                title,
                description,
                cover_image,
                draft,
                og_image,
                tags,
                language,
                hero_image,
                publish_date,
                updated_date,
                series_id,
                order_in_series,
                extra,
            }),
            _ => Err(SchemaErrors::from(errors)),
        }
    }
}

/// Read and resolve a nested image structure's required `src` field.
fn resolve_image(inner: &mut RecordReader<'_>, images: &dyn ImageResolver) -> Option<ImageRef> {
    let src = inner.require_string("src")?;
    match images.resolve(&src) {
        Ok(image) => Some(image),
        Err(e) => {
            inner.fail("src", "resolvable image", format!("{src:?} ({e})"));
            None
        }
    }
}

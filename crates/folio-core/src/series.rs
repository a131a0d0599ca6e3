//! Series record schema.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::schema::{RecordReader, SchemaErrors};

/// A validated series record: a named, curated sequence of posts. Posts
/// point at a series through their `seriesId` field; the link is soft and
/// never validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Declared series identifier, referenced by posts.
    pub id: String,

    /// Series title.
    pub title: String,

    /// Series description.
    pub description: String,

    /// Marks the series for promotional surfacing. Defaults to `false`.
    #[serde(default)]
    pub featured: bool,
}

impl Series {
    /// Validate a raw front matter record into a series.
    pub fn from_raw(raw: &Value) -> Result<Self, SchemaErrors> {
        let mut reader = RecordReader::new(raw);

        let id = reader.require_string("id");
        let title = reader.require_string("title");
        let description = reader.require_string("description");
        let featured = reader.bool_or("featured", false);

        let errors = reader.into_errors();
        match (id, title, description) {
            (Some(id), Some(title), Some(description)) if errors.is_empty() => Ok(Self {
                id,
                title,
                description,
                featured,
            }),
            _ => Err(SchemaErrors::from(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).expect("parse yaml")
    }

    #[test]
    fn test_valid_series() {
        let series = Series::from_raw(&raw(
            "id: rust-basics\ntitle: Rust Basics\ndescription: From zero",
        ))
        .expect("valid series");
        assert_eq!(series.id, "rust-basics");
        assert!(!series.featured);
    }

    #[test]
    fn test_featured_override() {
        let series = Series::from_raw(&raw(
            "id: a\ntitle: A\ndescription: d\nfeatured: true",
        ))
        .expect("valid series");
        assert!(series.featured);
    }

    #[test]
    fn test_missing_description_fails() {
        let errors = Series::from_raw(&raw("id: a\ntitle: A")).unwrap_err();
        assert!(errors.iter().any(|e| e.path == "description"));
    }

    #[test]
    fn test_no_title_length_cap() {
        // The 60-character cap applies to posts, not series.
        let long = "t".repeat(80);
        let series = Series::from_raw(&raw(&format!("id: a\ntitle: {long}\ndescription: d")))
            .expect("valid series");
        assert_eq!(series.title.chars().count(), 80);
    }
}

//! Front matter splitting and raw parsing for content files.
//!
//! The leading structured block of a content file is parsed into an untyped
//! [`serde_yaml::Value`] mapping; per-kind schemas then validate that raw
//! record. TOML blocks are converted into the same value representation,
//! with native TOML datetimes rendered as strings so date coercion has a
//! single input shape downstream.

use std::path::Path;

use serde_yaml::Value;

use crate::error::{CoreError, Result};

/// Delimiter types for front matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML front matter delimited by `---`.
    Yaml,
    /// TOML front matter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into front matter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse a content file's front matter into a raw record, returning it with
/// the remaining body. A file without a front matter block yields an empty
/// mapping; whether that is acceptable is up to the record's schema.
pub fn parse_raw(content: &str, path: &Path) -> Result<(Value, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((
            Value::Mapping(serde_yaml::Mapping::new()),
            content.to_string(),
        ));
    };

    let raw = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str(fm_str)
            .map_err(|e| CoreError::frontmatter(path, e.to_string()))?,
        FrontmatterFormat::Toml => {
            let table: toml::Value =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_yaml(table)
        }
    };

    match raw {
        Value::Mapping(_) => Ok((raw, body.to_string())),
        other => Err(CoreError::frontmatter(
            path,
            format!("expected a mapping, got {}", crate::schema::describe(&other)),
        )),
    }
}

/// Convert a TOML value into the YAML value space used by the schema layer.
///
/// Datetimes become their string rendering (RFC 3339 shaped), which the date
/// coercion in [`crate::schema`] normalizes together with string input.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(serde_yaml::Number::from(f)),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_to_yaml).collect())
        }
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
publishDate: 2024-01-15
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = r#"+++
title = "Hello World"
publishDate = 2024-01-15
+++

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without front matter.";
        assert!(split_frontmatter(content).is_none());
    }

    #[test]
    fn test_parse_raw_yaml() {
        let content = "---\ntitle: Test\ndraft: true\n---\nBody";
        let (raw, body) = parse_raw(content, Path::new("test.md")).expect("parse");
        assert_eq!(raw.get("title").and_then(Value::as_str), Some("Test"));
        assert_eq!(raw.get("draft").and_then(Value::as_bool), Some(true));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_raw_without_block_is_empty_mapping() {
        let content = "Body only";
        let (raw, body) = parse_raw(content, Path::new("test.md")).expect("parse");
        assert!(matches!(raw, Value::Mapping(ref m) if m.is_empty()));
        assert_eq!(body, "Body only");
    }

    #[test]
    fn test_parse_raw_bad_yaml_reports_path() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_raw(content, Path::new("content/post/x.md")).unwrap_err();
        assert!(err.to_string().contains("content/post/x.md"));
    }

    #[test]
    fn test_toml_datetime_becomes_string() {
        let content = "+++\npublishDate = 2024-01-15T10:00:00Z\n+++\nBody";
        let (raw, _) = parse_raw(content, Path::new("test.md")).expect("parse");
        assert_eq!(
            raw.get("publishDate").and_then(Value::as_str),
            Some("2024-01-15T10:00:00Z")
        );
    }

    #[test]
    fn test_toml_scalars_map_over() {
        let content = "+++\ncount = 3\nratio = 0.5\nflag = true\nitems = [\"a\", \"b\"]\n+++\n";
        let (raw, _) = parse_raw(content, Path::new("test.md")).expect("parse");
        assert_eq!(raw.get("count").and_then(Value::as_i64), Some(3));
        assert_eq!(raw.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(raw.get("flag").and_then(Value::as_bool), Some(true));
        assert!(matches!(raw.get("items"), Some(Value::Sequence(s)) if s.len() == 2));
    }
}

//! Field-level validation over raw front matter values.
//!
//! Records are read out of an untyped [`serde_yaml::Value`] mapping through a
//! [`RecordReader`], which visits every field and aggregates all failures into
//! a single [`SchemaErrors`] value instead of stopping at the first one.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::Value;

/// A single failed field: where, what was expected, what was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `coverImage.alt`.
    pub path: String,

    /// The violated constraint, e.g. `string of at most 60 characters`.
    pub expected: String,

    /// Description of the offending value, e.g. `boolean true` or `(missing)`.
    pub actual: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Field error for a required key that was absent.
    pub fn missing(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::new(path, expected, "(missing)")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// All field errors for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors(Vec<FieldError>);

impl std::error::Error for SchemaErrors {}

impl SchemaErrors {
    /// Iterate over the individual field errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FieldError>> for SchemaErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// Describe a raw value for diagnostics.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean `{b}`"),
        Value::Number(n) => format!("number `{n}`"),
        Value::String(s) => format!("string {s:?}"),
        Value::Sequence(_) => "a sequence".to_string(),
        Value::Mapping(_) => "a mapping".to_string(),
        Value::Tagged(t) => describe(&t.value),
    }
}

/// Parse a date from its accepted input representations.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
/// plain `YYYY-MM-DD` dates (normalized to midnight UTC).
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(ndt, Utc));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

/// Canonicalize a tag list: lowercase every entry, then drop duplicates,
/// keeping first-occurrence order.
///
/// This is the second stage of the tags pipeline; defaulting an absent list
/// to empty happens before calling this, in the reader.
pub fn canonicalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| tag.to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Reader over one raw record that accumulates field errors.
///
/// Every accessor records a [`FieldError`] and returns the absent/default
/// shape on failure, so a caller can read out the whole record and report
/// all problems at once.
#[derive(Debug)]
pub struct RecordReader<'a> {
    raw: &'a Value,
    prefix: String,
    errors: Vec<FieldError>,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over a raw record.
    pub fn new(raw: &'a Value) -> Self {
        Self {
            raw,
            prefix: String::new(),
            errors: Vec::new(),
        }
    }

    /// Create a reader over a nested mapping, prefixing field paths.
    fn nested(raw: &'a Value, prefix: impl Into<String>) -> Self {
        Self {
            raw,
            prefix: prefix.into(),
            errors: Vec::new(),
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    /// Record an error on `key` with the reader's path prefix applied.
    pub fn fail(&mut self, key: &str, expected: impl Into<String>, actual: impl Into<String>) {
        let path = self.path(key);
        self.errors.push(FieldError::new(path, expected, actual));
    }

    /// Consume the reader, yielding the accumulated errors.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.raw.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    /// Required string field.
    pub fn require_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.fail(key, "string", describe(other));
                None
            }
            None => {
                let path = self.path(key);
                self.errors.push(FieldError::missing(path, "string"));
                None
            }
        }
    }

    /// Optional string field; absent yields `None` without error.
    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.fail(key, "string", describe(other));
                None
            }
            None => None,
        }
    }

    /// Boolean field with a default for absence. An explicit value of the
    /// correct type always overrides the default.
    pub fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.fail(key, "boolean", describe(other));
                default
            }
            None => default,
        }
    }

    /// Optional boolean field.
    pub fn optional_bool(&mut self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                self.fail(key, "boolean", describe(other));
                None
            }
            None => None,
        }
    }

    /// Optional numeric field.
    pub fn optional_number(&mut self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => {
                self.fail(key, "number", describe(other));
                None
            }
            None => None,
        }
    }

    /// Optional unsigned integer field (e.g. pixel dimensions).
    pub fn optional_u32(&mut self, key: &str) -> Option<u32> {
        match self.get(key) {
            Some(Value::Number(n)) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(v) => Some(v),
                None => {
                    self.fail(key, "non-negative integer", format!("number `{n}`"));
                    None
                }
            },
            Some(other) => {
                self.fail(key, "non-negative integer", describe(other));
                None
            }
            None => None,
        }
    }

    /// String list field defaulting to empty when absent (stage one of the
    /// tags pipeline). Elements of the wrong type fail individually with an
    /// indexed path.
    pub fn string_list_or_default(&mut self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Sequence(seq)) => {
                let mut out = Vec::with_capacity(seq.len());
                for (i, item) in seq.iter().enumerate() {
                    match item {
                        Value::String(s) => out.push(s.clone()),
                        other => {
                            let path = format!("{}[{i}]", self.path(key));
                            self.errors
                                .push(FieldError::new(path, "string", describe(other)));
                        }
                    }
                }
                out
            }
            Some(other) => {
                self.fail(key, "sequence of strings", describe(other));
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Required date field; accepts a parseable string (or a pre-parsed date
    /// already rendered to RFC 3339 by the front matter layer).
    pub fn require_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        match self.get(key) {
            Some(Value::String(s)) => match parse_date(s) {
                Some(date) => Some(date),
                None => {
                    self.fail(key, "date (YYYY-MM-DD or RFC 3339)", format!("string {s:?}"));
                    None
                }
            },
            Some(other) => {
                self.fail(key, "date (YYYY-MM-DD or RFC 3339)", describe(other));
                None
            }
            None => {
                let path = self.path(key);
                self.errors
                    .push(FieldError::missing(path, "date (YYYY-MM-DD or RFC 3339)"));
                None
            }
        }
    }

    /// Optional date field; absence stays absent, never a sentinel date.
    pub fn optional_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        match self.get(key) {
            Some(Value::String(s)) => match parse_date(s) {
                Some(date) => Some(date),
                None => {
                    self.fail(key, "date (YYYY-MM-DD or RFC 3339)", format!("string {s:?}"));
                    None
                }
            },
            Some(other) => {
                self.fail(key, "date (YYYY-MM-DD or RFC 3339)", describe(other));
                None
            }
            None => None,
        }
    }

    /// Optional nested mapping. Present yields a sub-reader with prefixed
    /// field paths; the caller reads the inner fields and hands the reader
    /// back through [`RecordReader::merge`]. Absent yields `None` with no
    /// partial defaulting.
    pub fn optional_mapping(&mut self, key: &str) -> Option<RecordReader<'a>> {
        match self.get(key) {
            Some(value @ Value::Mapping(_)) => Some(RecordReader::nested(value, self.path(key))),
            Some(other) => {
                self.fail(key, "mapping", describe(other));
                None
            }
            None => None,
        }
    }

    /// Fold a nested reader's errors back into this one.
    pub fn merge(&mut self, nested: RecordReader<'_>) {
        self.errors.extend(nested.errors);
    }

    /// Top-level keys not in `known`, preserved as loosely-typed extras.
    pub fn extra_fields(&self, known: &[&str]) -> std::collections::HashMap<String, Value> {
        let Value::Mapping(map) = self.raw else {
            return std::collections::HashMap::new();
        };
        map.iter()
            .filter_map(|(k, v)| match k {
                Value::String(name) if !known.contains(&name.as_str()) => {
                    Some((name.clone(), v.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

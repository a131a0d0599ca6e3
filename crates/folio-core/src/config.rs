//! Site configuration management.
//!
//! Configuration is loaded once at startup and passed by reference to
//! consumers; nothing mutates it afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide metadata.
    pub site: SiteConfig,

    /// Date formatting settings.
    #[serde(default)]
    pub date: DateConfig,

    /// Ordered navigation entries for header/footer.
    #[serde(default)]
    pub menu: Vec<MenuLink>,

    /// Content source layout.
    #[serde(default)]
    pub content: ContentConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,

    /// Site description for meta tags and the feed.
    #[serde(default)]
    pub description: Option<String>,

    /// HTML language tag.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// OpenGraph locale.
    #[serde(default = "default_og_locale")]
    pub og_locale: String,
}

/// Date formatting settings: a locale tag plus formatting options, mirroring
/// what templates hand to their date formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateConfig {
    /// Locale tag used when rendering dates (e.g. "en-GB").
    #[serde(default = "default_date_locale")]
    pub locale: String,

    /// Per-component formatting selectors.
    #[serde(default)]
    pub options: DateFormatOptions,
}

/// Formatting selector per date component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateFormatOptions {
    #[serde(default = "default_numeric")]
    pub day: String,

    #[serde(default = "default_short")]
    pub month: String,

    #[serde(default = "default_numeric")]
    pub year: String,
}

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    /// Path the entry links to, e.g. "/posts/".
    pub path: String,

    /// Display title.
    pub title: String,
}

/// Content source layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content root directory.
    #[serde(default = "default_content_root")]
    pub root: String,

    /// Subdirectory holding post files.
    #[serde(default = "default_post_dir")]
    pub post_dir: String,

    /// Subdirectory holding series files.
    #[serde(default = "default_series_dir")]
    pub series_dir: String,

    /// Subdirectory holding project files.
    #[serde(default = "default_project_dir")]
    pub project_dir: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether to keep draft posts when loading collections.
    #[serde(default)]
    pub drafts: bool,
}

// Default value functions
fn default_lang() -> String {
    "en".to_string()
}

fn default_og_locale() -> String {
    "en_US".to_string()
}

fn default_date_locale() -> String {
    "en-US".to_string()
}

fn default_numeric() -> String {
    "numeric".to_string()
}

fn default_short() -> String {
    "short".to_string()
}

fn default_content_root() -> String {
    "content".to_string()
}

fn default_post_dir() -> String {
    "post".to_string()
}

fn default_series_dir() -> String {
    "series".to_string()
}

fn default_project_dir() -> String {
    "project".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            locale: default_date_locale(),
            options: DateFormatOptions::default(),
        }
    }
}

impl Default for DateFormatOptions {
    fn default() -> Self {
        Self {
            day: default_numeric(),
            month: default_short(),
            year: default_numeric(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
            post_dir: default_post_dir(),
            series_dir: default_series_dir(),
            project_dir: default_project_dir(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            drafts: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment overrides (`FOLIO__` prefix).
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Portfolio"
base_url = "https://example.com"
author = "Test Author"
description = "A portfolio and blog"
lang = "en-GB"
og_locale = "en_GB"

[date]
locale = "en-GB"

[date.options]
day = "numeric"
month = "short"
year = "numeric"

[[menu]]
path = "/"
title = "Home"

[[menu]]
path = "/projects/"
title = "Projects"

[[menu]]
path = "/posts/"
title = "Blog"

[content]
root = "content"

[build]
output_dir = "dist"
drafts = true
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, create_test_config()).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Portfolio");
        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.site.author.as_deref(), Some("Test Author"));
        assert_eq!(config.site.lang, "en-GB");
        assert_eq!(config.site.og_locale, "en_GB");
        assert_eq!(config.date.locale, "en-GB");
        assert_eq!(config.date.options.month, "short");
        assert_eq!(config.menu.len(), 3);
        assert_eq!(config.menu[1].path, "/projects/");
        assert_eq!(config.build.output_dir, "dist");
        assert!(config.build.drafts);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
base_url = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.lang, "en");
        assert_eq!(config.site.og_locale, "en_US");
        assert_eq!(config.date.options.day, "numeric");
        assert!(config.menu.is_empty());
        assert_eq!(config.content.root, "content");
        assert_eq!(config.content.post_dir, "post");
        assert_eq!(config.content.project_dir, "project");
        assert_eq!(config.build.output_dir, "public");
        assert!(!config.build.drafts);
    }

    #[test]
    fn test_url_for() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"Test\"\nbase_url = \"https://example.com\"\n",
        )
        .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(
            config.url_for("/projects/a/"),
            "https://example.com/projects/a/"
        );
        assert_eq!(
            config.url_for("projects/a/"),
            "https://example.com/projects/a/"
        );
    }

    #[test]
    fn test_load_with_env_overrides_file_value() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"From File\"\nbase_url = \"https://example.com\"\n",
        )
        .expect("write");

        // SAFETY: no other test in this binary touches this variable.
        unsafe { std::env::set_var("FOLIO__SITE__TITLE", "From Env") };
        let config = Config::load_with_env(&config_path).expect("load config");
        unsafe { std::env::remove_var("FOLIO__SITE__TITLE") };

        assert_eq!(config.site.title, "From Env");
        // Untouched values still come from the file.
        assert_eq!(config.site.base_url, "https://example.com");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"\"\nbase_url = \"https://example.com\"\n",
        )
        .expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}

//! Check command - validate configuration and content

use std::{collections::HashSet, path::Path};

use color_eyre::eyre::{Result, bail};
use folio_core::Config;
use folio_generator::ContentCollector;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every content file, reporting all field
/// errors per file. Warnings only fail the run under `--strict`.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(mut config) = config {
        check_config_values(&config, &mut result);

        // Drafts must pass validation too, even though builds skip them.
        config.build.drafts = true;

        println!("\nChecking content files...");
        let content_root = config.content.root.clone();
        if Path::new(&content_root).exists() {
            validate_content(config, &mut result);
        } else {
            result.add_warning(format!("Content directory does not exist: {content_root}"));
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate every content file through the collector, folding per-file
/// failures and soft-reference warnings into the result.
fn validate_content(config: Config, result: &mut ValidationResult) {
    let store = ContentCollector::new(config).collect();
    let checked = store.posts.len() + store.projects.len() + store.series.len();

    for failure in &store.errors {
        result.add_error(format!("{}: {}", failure.path.display(), failure.source));
    }

    // Dangling seriesId is a soft link: worth a warning, never an error.
    let known: HashSet<&str> = store.series.iter().map(|s| s.id.as_str()).collect();
    for post in &store.posts {
        if let Some(series_id) = post.series_id.as_deref()
            && !known.contains(series_id)
        {
            result.add_warning(format!(
                "post '{}' references unknown series '{series_id}'",
                post.id
            ));
        }
    }

    if store.errors.is_empty() {
        println!("  ✓ All {checked} content records valid");
    } else {
        println!(
            "  ✗ {}/{} content records have errors",
            store.errors.len(),
            checked + store.errors.len()
        );
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    for link in &config.menu {
        if !link.path.starts_with('/') {
            result.add_warning(format!(
                "menu entry '{}' has a non-absolute path: {}",
                link.title, link.path
            ));
        }
    }

    let output = Path::new(&config.build.output_dir);
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            config.build.output_dir
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    fn config_toml(root: &Path) -> String {
        format!(
            "[site]\ntitle = \"T\"\nbase_url = \"https://example.com\"\n\n[content]\nroot = \"{}\"\n",
            root.join("content").display()
        )
    }

    #[test]
    fn test_check_passes_on_valid_tree() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(
            root,
            "content/post/a.md",
            "---\ntitle: A\ndescription: d\npublishDate: 2024-01-01\n---\n",
        );
        let config_path = root.join("config.toml");
        std::fs::write(&config_path, config_toml(root)).expect("write config");

        assert!(run(&config_path, false).is_ok());
    }

    #[test]
    fn test_check_fails_on_schema_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(root, "content/post/bad.md", "---\ntitle: Bad\n---\n");
        let config_path = root.join("config.toml");
        std::fs::write(&config_path, config_toml(root)).expect("write config");

        assert!(run(&config_path, false).is_err());
    }

    #[test]
    fn test_dangling_series_is_warning_only() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(
            root,
            "content/post/a.md",
            "---\ntitle: A\ndescription: d\npublishDate: 2024-01-01\nseriesId: ghost\n---\n",
        );
        let config_path = root.join("config.toml");
        std::fs::write(&config_path, config_toml(root)).expect("write config");

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }
}

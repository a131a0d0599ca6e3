//! Build command - validates content and writes the project feed

use std::{fs, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{ContentCollector, FeedGenerator};

/// Run the build command.
///
/// Loads and validates all collections, reports per-file failures (siblings
/// still build), and writes `projects/rss.xml` under the output directory.
pub fn run(config_path: &Path, output: Option<&Path>, drafts: bool) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }
    // --drafts widens the config file setting; it never unsets it.
    config.build.drafts |= drafts;

    let output_dir = config.build.output_dir.clone();
    let store = ContentCollector::new(config.clone()).collect();

    if !store.errors.is_empty() {
        println!();
        println!("  Skipped records:");
        for failure in &store.errors {
            println!("  ✗ {}: {}", failure.path.display(), failure.source);
        }
        println!();
    }

    let feed = FeedGenerator::new(config)
        .generate(&store.projects)
        .wrap_err("Feed generation failed")?;

    let feed_path = Path::new(&output_dir).join("projects").join("rss.xml");
    if let Some(parent) = feed_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create output directory")?;
    }
    fs::write(&feed_path, feed).wrap_err("Failed to write feed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:    {}", store.posts.len());
    println!("  Projects: {}", store.projects.len());
    println!("  Series:   {}", store.series.len());
    println!("  Skipped:  {}", store.errors.len());
    println!();
    println!("  Duration: {:.2}s", duration.as_secs_f64());
    println!("  Feed:     {}", feed_path.display());
    println!();

    tracing::info!(?duration, feed = %feed_path.display(), "Build completed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_writes_feed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();

        let project_dir = root.join("content/project");
        fs::create_dir_all(&project_dir).expect("mkdir");
        fs::write(
            project_dir.join("app.md"),
            "---\ntitle: App\ndescription: d\npublishDate: 2024-01-01\n---\n",
        )
        .expect("write");

        let config_path = root.join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[site]\ntitle = \"T\"\nbase_url = \"https://example.com\"\n\n[content]\nroot = \"{}\"\n\n[build]\noutput_dir = \"{}\"\n",
                root.join("content").display(),
                root.join("public").display()
            ),
        )
        .expect("write config");

        run(&config_path, None, false).expect("build");

        let feed = fs::read_to_string(root.join("public/projects/rss.xml")).expect("feed");
        assert!(feed.contains("https://example.com/projects/app/"));
    }

    #[test]
    fn test_config_drafts_survive_without_flag() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();

        let project_dir = root.join("content/project");
        fs::create_dir_all(&project_dir).expect("mkdir");
        fs::write(
            project_dir.join("wip.md"),
            "---\ntitle: Wip\ndescription: d\npublishDate: 2024-01-01\ndraft: true\n---\n",
        )
        .expect("write");

        let config_path = root.join("config.toml");
        fs::write(
            &config_path,
            format!(
                "[site]\ntitle = \"T\"\nbase_url = \"https://example.com\"\n\n[content]\nroot = \"{}\"\n\n[build]\noutput_dir = \"{}\"\ndrafts = true\n",
                root.join("content").display(),
                root.join("public").display()
            ),
        )
        .expect("write config");

        // drafts = true in the config file holds even without --drafts.
        run(&config_path, None, false).expect("build");

        let feed = fs::read_to_string(root.join("public/projects/rss.xml")).expect("feed");
        assert!(feed.contains("https://example.com/projects/wip/"));
    }
}

//! Folio CLI
//!
//! Validates site content and generates the project feed.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Content validation and feed generation for a portfolio/blog site"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Validate content and write build artifacts (the project feed)
    Build {
        /// Output directory
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },
    /// Serve the feed endpoint and built output
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 4321)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Build { output, drafts } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), drafts)?;
        }
        Commands::Serve { port } => {
            folio::cmd::serve::run(&cli.config, port).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_check_parsing() {
        let cli = Cli::parse_from(["folio", "check", "--strict"]);
        assert_eq!(cli.config, std::path::PathBuf::from("config.toml"));
        assert!(matches!(cli.command, Commands::Check { strict: true }));
    }

    #[test]
    fn test_cli_build_parsing() {
        let cli = Cli::parse_from(["folio", "-vv", "build", "--output", "dist"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build { output, drafts } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(!drafts);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_serve_defaults() {
        let cli = Cli::parse_from(["folio", "serve"]);
        assert!(matches!(cli.command, Commands::Serve { port: 4321 }));
    }
}

//! docsite CLI - validate and tidy documentation site manifests.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::check::OutputFormat;

#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "Validate and tidy documentation site manifests")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the site manifest
    #[arg(short = 'f', long, default_value = "mkdocs.yml")]
    manifest: PathBuf,

    /// Path to docsite.toml config file
    #[arg(short, long, default_value = "docsite.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest against the docs directory
    Check {
        /// Fail on warnings as well as errors
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Suppress a diagnostic code (repeatable)
        #[arg(long, value_name = "CODE")]
        ignore: Vec<String>,
    },

    /// Print the navigation tree with resolved titles
    Nav {
        /// Show page URLs and edit links
        #[arg(long)]
        urls: bool,
    },

    /// Rewrite the manifest in canonical form, preserving key order
    Fmt {
        /// Only report whether the file would change
        #[arg(long)]
        check: bool,
    },

    /// Create a starter manifest and docs directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// List validation rules and their severities
    Rules,

    /// Re-run validation whenever the manifest or docs change
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Check {
            strict,
            format,
            ignore,
        } => {
            let mut config = config::load_config(&cli.config)?.check;
            config.strict |= strict;
            config.ignore.extend(ignore);
            commands::check::run(&cli.manifest, config, format).await
        }
        Commands::Nav { urls } => commands::nav::run(&cli.manifest, urls).await,
        Commands::Fmt { check } => commands::fmt::run(&cli.manifest, check).await,
        Commands::Init { yes } => {
            commands::init::run(&cli.manifest, yes).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Rules => {
            let config = config::load_config(&cli.config)?.check;
            commands::rules::run(config).await
        }
        Commands::Watch => {
            let config = config::load_config(&cli.config)?.check;
            commands::watch::run(&cli.manifest, config).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

//! Manifest validation command.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ValueEnum;
use docsite_check::{CheckConfig, Checker, Report};

/// How findings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Run the check command.
pub async fn run(manifest: &Path, config: CheckConfig, format: OutputFormat) -> Result<ExitCode> {
    tracing::debug!("Checking {}", manifest.display());

    let strict = config.strict;
    let report = Checker::new(config)
        .check_file(manifest)
        .with_context(|| format!("Failed to check {}", manifest.display()))?;

    print!("{}", render(&report, format)?);

    Ok(exit_code(&report, strict))
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(report.render()),
        OutputFormat::Json => {
            let json = report.to_json().context("Failed to serialize report")?;
            Ok(json + "\n")
        }
    }
}

fn exit_code(report: &Report, strict: bool) -> ExitCode {
    if report.fails(strict) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

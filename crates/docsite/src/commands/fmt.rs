//! Manifest formatting command.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use docsite_manifest::ManifestDocument;

/// Run the fmt command.
///
/// With `check`, nothing is written and a file that would change fails.
pub async fn run(manifest: &Path, check: bool) -> Result<ExitCode> {
    let current = fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let document = ManifestDocument::parse(&current)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;
    let formatted = document.to_yaml()?;

    if formatted == current {
        tracing::info!("{} is already formatted", manifest.display());
        return Ok(ExitCode::SUCCESS);
    }

    if check {
        tracing::warn!("{} would be reformatted", manifest.display());
        return Ok(ExitCode::FAILURE);
    }

    fs::write(manifest, formatted)
        .with_context(|| format!("Failed to write {}", manifest.display()))?;
    tracing::info!("Formatted {}", manifest.display());

    Ok(ExitCode::SUCCESS)
}

//! Navigation outline command.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use docsite_check::{Inventory, Outline};
use docsite_manifest::ManifestDocument;

/// Run the nav command.
pub async fn run(manifest: &Path, urls: bool) -> Result<ExitCode> {
    let document = ManifestDocument::load(manifest)
        .with_context(|| format!("Failed to load {}", manifest.display()))?;

    let outline = outline(&document);
    if outline.is_generated() {
        tracing::info!("No nav configured, showing the order pages would be listed in");
    }

    print!("{}", outline.render(urls));

    Ok(ExitCode::SUCCESS)
}

fn outline(document: &ManifestDocument) -> Outline {
    let inventory = Inventory::scan(&document.docs_root());
    if !inventory.exists() {
        tracing::warn!(
            "Docs directory {} does not exist",
            inventory.root().display()
        );
    }
    Outline::build(document, &inventory)
}

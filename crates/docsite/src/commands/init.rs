//! Create a starter documentation site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(manifest: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing documentation site...");

    let base_dir = match manifest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let docs_dir = base_dir.join("docs");

    if manifest.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            manifest.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;

    fs::write(manifest, DEFAULT_MANIFEST)
        .with_context(|| format!("Failed to write {}", manifest.display()))?;
    tracing::info!("Created {}", manifest.display());

    // Create index page
    let index_path = docs_dir.join("index.md");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write index.md")?;
        tracing::info!("Created {}", index_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docsite check' to validate the site.");

    Ok(())
}

const DEFAULT_MANIFEST: &str = r#"site_name: My Documentation
theme:
  name: material
markdown_extensions:
  - toc:
      permalink: true
  - admonition
  - meta
nav:
  - Home: index.md
"#;

const DEFAULT_INDEX: &str = r#"# Welcome

This is your documentation site.

## Adding pages

Create markdown files under `docs/` and list them in the `nav` section of
`mkdocs.yml`:

```yaml
nav:
  - Home: index.md
  - Guide:
      - Setup: guide/setup.md
```

Run `docsite check` to make sure every page exists, and `docsite nav` to
see the resulting navigation.
"#;

//! Manifest checker.

use std::path::Path;
use std::time::Instant;

use docsite_manifest::{ManifestDocument, ManifestError};

use crate::config::CheckConfig;
use crate::inventory::Inventory;
use crate::report::Report;
use crate::rule::{Context, Findings, Rule};
use crate::rules::default_rules;

/// Errors that stop a check before any rule runs.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to load manifest: {0}")]
    Manifest(#[from] ManifestError),
}

/// Runs validation rules over a manifest.
pub struct Checker {
    config: CheckConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl Checker {
    /// Create a checker with the default rule set.
    pub fn new(config: CheckConfig) -> Self {
        Self::with_rules(config, default_rules())
    }

    /// Create a checker with a custom rule set.
    pub fn with_rules(config: CheckConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Rules that will run, in order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Load a manifest file and check it.
    pub fn check_file(&self, path: &Path) -> Result<Report, CheckError> {
        let document = ManifestDocument::load(path)?;
        Ok(self.run(&document))
    }

    /// Check a loaded manifest.
    pub fn run(&self, document: &ManifestDocument) -> Report {
        let start = Instant::now();
        let inventory = Inventory::scan(&document.docs_root());

        let ctx = Context {
            document,
            inventory: &inventory,
            config: &self.config,
        };

        let mut report = Report::new();
        for rule in &self.rules {
            if self.config.is_ignored(rule.code()) {
                tracing::debug!("Skipping ignored rule {}", rule.code());
                continue;
            }
            rule.check(&ctx, &mut Findings::new(rule.as_ref(), &mut report));
        }

        let summary = report.summary();
        tracing::debug!(
            "Checked {} rules in {}ms: {} errors, {} warnings",
            self.rules.len(),
            start.elapsed().as_millis(),
            summary.errors,
            summary.warnings
        );

        report
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(CheckConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const NABBOT: &str = r#"site_name: NabBot
site_description: 'A Discord bot for Tibia'
site_author: Galarzaa90
theme:
  name: material
  palette:
    primary: blue grey
    accent: light blue
  logo: assets/logo.png
  favicon: assets/favicon.png
  feature:
    tabs: true
extra_css:
  - stylesheets/extra.css
markdown_extensions:
  - toc:
      permalink: true
  - admonition
  - codehilite
  - pymdownx.superfences
  - pymdownx.details
  - pymdownx.mark
  - pymdownx.tilde
  - meta
google_analytics:
  - UA-12345678-1
  - auto
extra:
  social:
    - type: github-alt
      link: https://github.com/Galarzaa90
repo_url: https://github.com/Galarzaa90/NabBot
edit_uri: ''
pages:
  - Home: index.md
  - Features:
      - Overview: features/index.md
      - Autoroles: features/autoroles.md
"#;

    fn write_site(root: &Path, files: &[&str]) {
        fs::write(root.join("mkdocs.yml"), NABBOT).unwrap();
        for file in files {
            let target = root.join("docs").join(file);
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::write(target, "# Page\n").unwrap();
        }
    }

    const ALL_FILES: &[&str] = &[
        "index.md",
        "features/index.md",
        "features/autoroles.md",
        "assets/logo.png",
        "assets/favicon.png",
        "stylesheets/extra.css",
    ];

    #[test]
    fn complete_site_only_warns_about_pages_key() {
        let temp = tempdir().unwrap();
        write_site(temp.path(), ALL_FILES);

        let report = Checker::default()
            .check_file(&temp.path().join("mkdocs.yml"))
            .unwrap();

        let codes: Vec<_> = report.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["deprecated-pages-key"]);
        assert!(!report.fails(false));
        assert!(report.fails(true));
    }

    #[test]
    fn reports_in_rule_order() {
        let temp = tempdir().unwrap();
        write_site(temp.path(), &["index.md", "features/index.md", "notes.md"]);

        let report = Checker::default()
            .check_file(&temp.path().join("mkdocs.yml"))
            .unwrap();

        let codes: Vec<_> = report.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![
                "nav-missing-file",
                "deprecated-pages-key",
                "missing-extra-css",
                "missing-theme-asset",
                "missing-theme-asset",
                "orphan-page",
            ]
        );
        assert!(report.has_errors());
        assert_eq!(report.diagnostics()[0].severity, Severity::Error);
    }

    #[test]
    fn ignored_rules_do_not_run() {
        let temp = tempdir().unwrap();
        write_site(temp.path(), ALL_FILES);

        let checker = Checker::new(CheckConfig {
            ignore: vec!["deprecated-pages-key".to_string()],
            ..Default::default()
        });
        let report = checker.check_file(&temp.path().join("mkdocs.yml")).unwrap();

        assert!(report.is_empty());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let temp = tempdir().unwrap();

        let result = Checker::default().check_file(&temp.path().join("mkdocs.yml"));

        assert!(matches!(result, Err(CheckError::Manifest(_))));
    }

    #[test]
    fn runs_custom_rules() {
        struct AlwaysWarn;

        impl Rule for AlwaysWarn {
            fn code(&self) -> &'static str {
                "always-warn"
            }
            fn severity(&self) -> Severity {
                Severity::Warning
            }
            fn description(&self) -> &'static str {
                "test rule"
            }
            fn check(&self, _ctx: &Context<'_>, out: &mut Findings<'_>) {
                out.emit("site_name", "always");
            }
        }

        let doc = ManifestDocument::parse("site_name: X\n").unwrap();
        let checker = Checker::with_rules(CheckConfig::default(), vec![Box::new(AlwaysWarn)]);
        let report = checker.run(&doc);

        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(report.diagnostics()[0].code, "always-warn");
        assert_eq!(checker.rules().count(), 1);
    }
}

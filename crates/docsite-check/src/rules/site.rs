//! Site-level rules.

use docsite_manifest::NavKey;

use crate::report::Severity;
use crate::rule::{Context, Findings, Rule};

/// `site_name` must be set.
pub struct MissingSiteName;

impl Rule for MissingSiteName {
    fn code(&self) -> &'static str {
        "missing-site-name"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "site_name is required"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        if ctx.manifest().site_name.trim().is_empty() {
            out.emit("site_name", "site_name is missing or blank");
        }
    }
}

/// The docs directory must exist.
pub struct MissingDocsDir;

impl Rule for MissingDocsDir {
    fn code(&self) -> &'static str {
        "missing-docs-dir"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "docs_dir must point at an existing directory"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        if !ctx.inventory.exists() {
            out.emit(
                "docs_dir",
                format!(
                    "documentation directory '{}' does not exist",
                    ctx.docs_root().display()
                ),
            );
        }
    }
}

/// `pages` is the legacy name for `nav`.
pub struct DeprecatedPagesKey;

impl Rule for DeprecatedPagesKey {
    fn code(&self) -> &'static str {
        "deprecated-pages-key"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "the pages key is deprecated in favour of nav"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        if ctx.document.nav_key() == Some(NavKey::Pages) {
            out.emit("pages", "'pages' is deprecated, rename it to 'nav'");
        }
    }
}

/// Top-level keys the generator does not recognise.
pub struct UnknownKey;

impl Rule for UnknownKey {
    fn code(&self) -> &'static str {
        "unknown-key"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "top-level key is not recognised"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        for key in ctx.document.unknown_keys() {
            if !ctx.config.is_known_key(key) {
                out.emit(key, format!("unrecognised configuration key '{}'", key));
            }
        }
    }
}

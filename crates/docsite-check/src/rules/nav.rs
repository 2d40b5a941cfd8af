//! Navigation tree rules.

use std::collections::HashSet;

use docsite_manifest::{NavEntry, NavPath};
use rayon::prelude::*;

use crate::inventory::{is_markdown, normalize};
use crate::report::Severity;
use crate::rule::{Context, Findings, Rule};

/// Page leaves of the nav, or nothing when no nav is configured.
fn nav_pages<'a>(ctx: &Context<'a>) -> Vec<(NavPath, &'a str)> {
    ctx.manifest()
        .nav
        .as_ref()
        .map(|nav| nav.pages())
        .unwrap_or_default()
}

/// Whether a relative path climbs above the directory it is relative to.
pub fn escapes_root(path: &str) -> bool {
    let path = normalize(path);
    path.starts_with('/')
        || path.get(1..3) == Some(":/")
        || path == ".."
        || path.starts_with("../")
}

/// Every page leaf must resolve to an existing file.
pub struct NavMissingFile;

impl Rule for NavMissingFile {
    fn code(&self) -> &'static str {
        "nav-missing-file"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "nav page does not exist in the docs directory"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let missing: Vec<(NavPath, &str)> = nav_pages(ctx)
            .into_par_iter()
            .filter(|(_, page)| {
                !escapes_root(page) && !ctx.docs_path(&normalize(page)).is_file()
            })
            .collect();

        for (location, page) in missing {
            out.emit(
                location.to_string(),
                format!("'{}' does not exist in the docs directory", page),
            );
        }
    }
}

/// Page leaves must stay inside the docs directory.
pub struct NavPathEscapes;

impl Rule for NavPathEscapes {
    fn code(&self) -> &'static str {
        "nav-path-escapes"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "nav page points outside the docs directory"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        for (location, page) in nav_pages(ctx) {
            if escapes_root(page) {
                out.emit(
                    location.to_string(),
                    format!("'{}' points outside the docs directory", page),
                );
            }
        }
    }
}

/// Sections must contain at least one entry.
pub struct NavEmptySection;

impl Rule for NavEmptySection {
    fn code(&self) -> &'static str {
        "nav-empty-section"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn description(&self) -> &'static str {
        "nav section has no entries"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let Some(nav) = &ctx.manifest().nav else {
            return;
        };

        for (location, entry) in nav.walk() {
            if let NavEntry::Section { title, children } = entry {
                if children.is_empty() {
                    out.emit(
                        location.to_string(),
                        format!("section '{}' has no entries", title),
                    );
                }
            }
        }
    }
}

/// Page leaves should be markdown sources.
pub struct NavNotMarkdown;

impl Rule for NavNotMarkdown {
    fn code(&self) -> &'static str {
        "nav-not-markdown"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "nav page is not a markdown file"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        for (location, page) in nav_pages(ctx) {
            if !is_markdown(page) {
                out.emit(
                    location.to_string(),
                    format!("'{}' is not a markdown document", page),
                );
            }
        }
    }
}

/// A document should appear in the nav only once.
pub struct NavDuplicatePage;

impl Rule for NavDuplicatePage {
    fn code(&self) -> &'static str {
        "nav-duplicate-page"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn description(&self) -> &'static str {
        "document is listed in the nav more than once"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        let mut seen = HashSet::new();
        for (location, page) in nav_pages(ctx) {
            if !seen.insert(normalize(page)) {
                out.emit(
                    location.to_string(),
                    format!("'{}' is already listed in the nav", page),
                );
            }
        }
    }
}

/// Markdown sources that the nav never references.
pub struct OrphanPage;

impl Rule for OrphanPage {
    fn code(&self) -> &'static str {
        "orphan-page"
    }

    fn severity(&self) -> Severity {
        Severity::Info
    }

    fn description(&self) -> &'static str {
        "document exists but is not included in the nav"
    }

    fn check(&self, ctx: &Context<'_>, out: &mut Findings<'_>) {
        // Without a nav every document is listed automatically.
        if ctx.manifest().nav.is_none() {
            return;
        }

        let listed: HashSet<String> = nav_pages(ctx)
            .into_iter()
            .map(|(_, page)| normalize(page))
            .collect();

        let key = ctx
            .document
            .nav_key()
            .map_or("nav", |k| k.as_str());

        for file in ctx.inventory.markdown_files() {
            if !listed.contains(file) {
                out.emit(key, format!("'{}' is not included in the nav", file));
            }
        }
    }
}

//! Navigation outline with resolved titles, for display.

use std::collections::BTreeMap;

use docsite_manifest::{ManifestDocument, NavEntry};

use crate::inventory::{normalize, Inventory};
use crate::titles::{page_title, title_from_path};

/// Kind of outline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    Page,
    Link,
    Section,
}

/// One line of the outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineItem {
    /// Nesting depth (0 = top level)
    pub depth: usize,
    pub kind: OutlineKind,
    /// Resolved display title
    pub title: String,
    /// Document path or link target
    pub target: Option<String>,
    /// Site URL of a page
    pub url: Option<String>,
    /// "Edit this page" link
    pub edit_url: Option<String>,
    /// Whether a page exists on disk (always true for links and sections)
    pub exists: bool,
}

/// The resolved navigation, flattened in display order.
#[derive(Debug, Clone, Default)]
pub struct Outline {
    items: Vec<OutlineItem>,
    generated: bool,
}

impl Outline {
    /// Resolve the configured nav, or derive one from the docs directory.
    pub fn build(document: &ManifestDocument, inventory: &Inventory) -> Self {
        let (entries, generated) = match &document.manifest().nav {
            Some(nav) => (nav.entries().to_vec(), false),
            None => {
                let files: Vec<&str> = inventory.markdown_files().collect();
                (auto_nav(&files, ""), true)
            }
        };

        let mut items = Vec::new();
        push_items(&entries, 0, document, inventory, &mut items);
        Self { items, generated }
    }

    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    /// Whether the outline was derived from the docs directory.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Indented text tree, optionally with URLs and edit links.
    pub fn render(&self, show_urls: bool) -> String {
        let mut out = String::new();

        for item in &self.items {
            out.push_str(&"  ".repeat(item.depth));
            out.push_str(&item.title);

            if let Some(target) = &item.target {
                out.push_str(&format!("  ({})", target));
            }
            if !item.exists {
                out.push_str("  [missing]");
            }
            if show_urls {
                if let Some(url) = &item.url {
                    out.push_str(&format!("  -> /{}", url));
                }
                if let Some(edit) = &item.edit_url {
                    out.push_str(&format!("  edit: {}", edit));
                }
            }
            out.push('\n');
        }

        out
    }
}

fn push_items(
    entries: &[NavEntry],
    depth: usize,
    document: &ManifestDocument,
    inventory: &Inventory,
    out: &mut Vec<OutlineItem>,
) {
    let manifest = document.manifest();

    for entry in entries {
        match entry {
            NavEntry::Page { title, path } => {
                let exists = inventory.root().join(normalize(path)).is_file();
                let title = match title {
                    Some(t) => t.clone(),
                    None if exists => page_title(
                        inventory.root(),
                        path,
                        manifest.markdown_extensions.contains("meta"),
                    ),
                    None => title_from_path(path),
                };
                out.push(OutlineItem {
                    depth,
                    kind: OutlineKind::Page,
                    title,
                    target: Some(path.clone()),
                    url: Some(manifest.page_url(path)),
                    edit_url: manifest.edit_url(path),
                    exists,
                });
            }
            NavEntry::Link { title, url } => out.push(OutlineItem {
                depth,
                kind: OutlineKind::Link,
                title: title.clone().unwrap_or_else(|| url.clone()),
                target: Some(url.clone()),
                url: None,
                edit_url: None,
                exists: true,
            }),
            NavEntry::Section { title, children } => {
                out.push(OutlineItem {
                    depth,
                    kind: OutlineKind::Section,
                    title: title.clone(),
                    target: None,
                    url: None,
                    edit_url: None,
                    exists: true,
                });
                push_items(children, depth + 1, document, inventory, out);
            }
        }
    }
}

/// Derive a nav from markdown files: pages first (index leading), then one
/// section per subdirectory, both alphabetical.
fn auto_nav(files: &[&str], prefix: &str) -> Vec<NavEntry> {
    let mut pages: Vec<&str> = Vec::new();
    let mut dirs: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for &file in files {
        match file.split_once('/') {
            Some((dir, rest)) => dirs.entry(dir).or_default().push(rest),
            None => pages.push(file),
        }
    }

    pages.sort_by_key(|p| (!is_index(p), p.to_lowercase()));

    let mut entries: Vec<NavEntry> = pages
        .into_iter()
        .map(|p| NavEntry::Page {
            title: None,
            path: format!("{}{}", prefix, p),
        })
        .collect();

    for (dir, children) in dirs {
        let dir_prefix = format!("{}{}/", prefix, dir);
        entries.push(NavEntry::Section {
            title: title_from_path(&format!("{}index.md", dir_prefix)),
            children: auto_nav(&children, &dir_prefix),
        });
    }

    entries
}

fn is_index(file: &str) -> bool {
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    stem == "index" || stem.eq_ignore_ascii_case("readme")
}

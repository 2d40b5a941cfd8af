//! Inventory of files in the documentation directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions treated as markdown sources.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkdn", "mkd"];

/// Files found under the docs directory, as `/`-separated relative paths.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    root: PathBuf,
    exists: bool,
    files: BTreeSet<String>,
}

impl Inventory {
    /// Walk `root` and record every file below it.
    ///
    /// Hidden files and directories are skipped. A missing root yields an
    /// empty inventory.
    pub fn scan(root: &Path) -> Self {
        if !root.is_dir() {
            return Self {
                root: root.to_path_buf(),
                exists: false,
                files: BTreeSet::new(),
            };
        }

        let files = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(root)
                    .ok()
                    .map(|rel| normalize(&rel.to_string_lossy()))
            })
            .collect::<BTreeSet<_>>();

        tracing::debug!("Found {} files in {}", files.len(), root.display());

        Self {
            root: root.to_path_buf(),
            exists: true,
            files,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the docs directory exists.
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(&normalize(path))
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Markdown sources in sorted order.
    pub fn markdown_files(&self) -> impl Iterator<Item = &str> {
        self.files().filter(|f| is_markdown(f))
    }
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}

/// Check whether a path names a markdown source.
pub fn is_markdown(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| m.eq_ignore_ascii_case(ext))
        })
}

/// Normalize a docs-relative path to `/` separators with `.` and inner `..`
/// segments resolved.
///
/// `..` segments that climb above the start are kept, so
/// `a/../../x.md` becomes `../x.md`. A leading `/` is kept.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." if parts.last().is_some_and(|p| *p != "..") => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if path.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}

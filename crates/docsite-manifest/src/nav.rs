//! Navigation tree parsing.

use std::fmt;

use serde_yaml::Value;

use crate::error::ManifestError;

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry {
    /// A document inside the docs directory
    Page { title: Option<String>, path: String },

    /// A target outside the docs directory (URL or site-absolute path)
    Link { title: Option<String>, url: String },

    /// A named group of further entries
    Section {
        title: String,
        children: Vec<NavEntry>,
    },
}

impl NavEntry {
    /// Build a leaf, classifying the target as a page or a link.
    pub fn leaf(title: Option<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        if is_link(&target) {
            Self::Link { title, url: target }
        } else {
            Self::Page {
                title,
                path: target,
            }
        }
    }

    /// Explicit title, if the entry has one.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Page { title, .. } | Self::Link { title, .. } => title.as_deref(),
            Self::Section { title, .. } => Some(title),
        }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Self::Section { .. })
    }

    /// Parse an entry from YAML.
    fn from_value(value: &Value, location: &NavPath) -> Result<Self, ManifestError> {
        match value {
            Value::String(target) => Ok(Self::leaf(None, target.as_str())),
            Value::Mapping(map) if map.len() == 1 => {
                let (key, inner) = map
                    .iter()
                    .next()
                    .ok_or_else(|| shape(location, "empty entry"))?;
                let title = key
                    .as_str()
                    .ok_or_else(|| shape(location, "entry title must be a string"))?
                    .to_string();

                match inner {
                    Value::String(target) => Ok(Self::leaf(Some(title), target.as_str())),
                    Value::Sequence(items) => {
                        let section_path = location.section(&title);
                        let children = parse_entries(items, &section_path)?;
                        Ok(Self::Section { title, children })
                    }
                    _ => Err(shape(
                        location,
                        format!("'{}' must map to a path or a list of entries", title),
                    )),
                }
            }
            Value::Mapping(_) => Err(shape(location, "entry must have exactly one title")),
            _ => Err(shape(location, "expected a path or a titled entry")),
        }
    }
}

/// Location of a navigation entry, rendered like `nav[1].Features[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavPath(String);

impl NavPath {
    /// Root location, named after the key the tree was read from.
    pub fn root(key: &str) -> Self {
        Self(key.to_string())
    }

    fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    fn section(&self, title: &str) -> Self {
        Self(format!("{}.{}", self.0, title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered navigation tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Nav {
    root: String,
    entries: Vec<NavEntry>,
}

impl Nav {
    /// Parse the tree stored under `key`.
    pub fn from_value(key: &str, value: &Value) -> Result<Self, ManifestError> {
        let root = NavPath::root(key);
        let items = value
            .as_sequence()
            .ok_or_else(|| shape(&root, "expected a list of entries"))?;

        Ok(Self {
            root: key.to_string(),
            entries: parse_entries(items, &root)?,
        })
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries depth-first in display order, with their locations.
    pub fn walk(&self) -> Vec<(NavPath, &NavEntry)> {
        let mut out = Vec::new();
        walk_into(&self.entries, &NavPath::root(&self.root), &mut out);
        out
    }

    /// Page leaves in display order.
    pub fn pages(&self) -> Vec<(NavPath, &str)> {
        self.walk()
            .into_iter()
            .filter_map(|(path, entry)| match entry {
                NavEntry::Page { path: page, .. } => Some((path, page.as_str())),
                _ => None,
            })
            .collect()
    }
}

fn walk_into<'a>(entries: &'a [NavEntry], parent: &NavPath, out: &mut Vec<(NavPath, &'a NavEntry)>) {
    for (i, entry) in entries.iter().enumerate() {
        let path = parent.index(i);
        out.push((path.clone(), entry));
        if let NavEntry::Section { title, children } = entry {
            walk_into(children, &path.section(title), out);
        }
    }
}

fn parse_entries(items: &[Value], parent: &NavPath) -> Result<Vec<NavEntry>, ManifestError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| NavEntry::from_value(item, &parent.index(i)))
        .collect()
}

fn shape(location: &NavPath, message: impl Into<String>) -> ManifestError {
    ManifestError::NavShape {
        location: location.to_string(),
        message: message.into(),
    }
}

/// Check whether a nav target points outside the docs directory.
pub fn is_link(target: &str) -> bool {
    target.starts_with('/') || target.starts_with("mailto:") || has_scheme(target)
}

pub(crate) fn has_scheme(target: &str) -> bool {
    match target.find("://") {
        Some(pos) => {
            pos > 0
                && target[..pos]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        None => false,
    }
}

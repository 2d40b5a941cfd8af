//! Markdown extension list.

use std::collections::HashSet;

use serde_yaml::Value;

use crate::error::ManifestError;

/// A named markdown extension with optional settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    /// Extension name (e.g. `toc`, `pymdownx.details`)
    pub name: String,

    /// Extension settings, kept as written
    pub options: Option<Value>,
}

impl Extension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }
}

/// Ordered list of enabled extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    pub fn new(extensions: Vec<Extension>) -> Self {
        Self(extensions)
    }

    /// Parse either the list form or the mapping form.
    pub fn from_value(value: &Value) -> Result<Self, ManifestError> {
        const KEY: &str = "markdown_extensions";

        match value {
            Value::Null => Ok(Self::default()),
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    parse_item(item)
                        .map_err(|message| ManifestError::invalid(format!("{}[{}]", KEY, i), message))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            Value::Mapping(map) => map
                .iter()
                .map(|(name, options)| {
                    let name = name.as_str().ok_or_else(|| {
                        ManifestError::invalid(KEY, "extension names must be strings")
                    })?;
                    Ok(Extension {
                        name: name.to_string(),
                        options: non_null(options),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            _ => Err(ManifestError::invalid(KEY, "expected a list or a mapping")),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Extension> {
        self.0.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries whose name was already enabled earlier, as `(index, name)` in
    /// document order.
    pub fn duplicates(&self) -> Vec<(usize, &str)> {
        let mut seen = HashSet::new();

        self.0
            .iter()
            .enumerate()
            .filter(|(_, ext)| !seen.insert(ext.name.as_str()))
            .map(|(i, ext)| (i, ext.name.as_str()))
            .collect()
    }
}

fn parse_item(item: &Value) -> Result<Extension, String> {
    match item {
        Value::String(name) => Ok(Extension::new(name.as_str())),
        Value::Mapping(map) if map.len() == 1 => {
            let (name, options) = map.iter().next().ok_or("empty extension entry")?;
            let name = name.as_str().ok_or("extension name must be a string")?;
            Ok(Extension {
                name: name.to_string(),
                options: non_null(options),
            })
        }
        _ => Err("expected an extension name or a single-key mapping".to_string()),
    }
}

fn non_null(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other.clone()),
    }
}

//! Loading and writing manifest files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::ManifestError;
use crate::manifest::{Manifest, KNOWN_KEYS};

/// Key the navigation tree was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Nav,
    /// Legacy name for `nav`
    Pages,
}

impl NavKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nav => "nav",
            Self::Pages => "pages",
        }
    }

    /// Find which navigation key a manifest uses.
    pub fn detect(map: &Mapping) -> Result<Option<Self>, ManifestError> {
        let present = |key: &str| map.get(key).is_some_and(|v| !v.is_null());

        match (present("nav"), present("pages")) {
            (true, true) => Err(ManifestError::ConflictingKeys("nav", "pages")),
            (true, false) => Ok(Some(Self::Nav)),
            (false, true) => Ok(Some(Self::Pages)),
            (false, false) => Ok(None),
        }
    }
}

/// A loaded manifest file.
///
/// Keeps the raw ordered mapping next to the typed [`Manifest`], so writing the
/// document back preserves key order in every mapping and element order in
/// every sequence.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    raw: Mapping,
    manifest: Manifest,
    nav_key: Option<NavKey>,
    path: Option<PathBuf>,
}

impl ManifestDocument {
    /// Parse a manifest from YAML source.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_yaml::from_str(source)?;
        let Value::Mapping(raw) = value else {
            return Err(ManifestError::NotAMapping);
        };

        let nav_key = NavKey::detect(&raw)?;
        let manifest = Manifest::from_mapping(&raw)?;

        Ok(Self {
            raw,
            manifest,
            nav_key,
            path: None,
        })
    }

    /// Load a manifest file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = Self::parse(&source)?;
        doc.path = Some(path.to_path_buf());

        tracing::debug!(
            "Loaded {} ({} keys, nav from {})",
            path.display(),
            doc.raw.len(),
            doc.nav_key.map_or("nowhere", |k| k.as_str())
        );

        Ok(doc)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn raw(&self) -> &Mapping {
        &self.raw
    }

    pub fn nav_key(&self) -> Option<NavKey> {
        self.nav_key
    }

    /// File the document was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory relative paths in the manifest resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Absolute (or working-directory relative) documentation directory.
    pub fn docs_root(&self) -> PathBuf {
        self.base_dir().join(&self.manifest.docs_dir)
    }

    /// Top-level keys the site generator does not recognise, in file order.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.raw
            .keys()
            .filter_map(Value::as_str)
            .filter(|key| !KNOWN_KEYS.contains(key))
            .collect()
    }

    /// Serialize the document, preserving the original order.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(&self.raw)?)
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::str::FromStr for ManifestDocument {
    type Err = ManifestError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

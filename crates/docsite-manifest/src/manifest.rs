//! Typed view of a manifest.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::document::NavKey;
use crate::error::ManifestError;
use crate::extension::Extensions;
use crate::extra::{Analytics, Extra};
use crate::nav::Nav;
use crate::repo::{self, RepoHost};
use crate::theme::Theme;
use crate::url::page_url;

/// Top-level keys understood by the site generator.
pub const KNOWN_KEYS: &[&str] = &[
    "site_name",
    "site_url",
    "site_description",
    "site_author",
    "copyright",
    "docs_dir",
    "site_dir",
    "use_directory_urls",
    "theme",
    "extra_css",
    "extra_javascript",
    "extra_templates",
    "markdown_extensions",
    "google_analytics",
    "extra",
    "repo_url",
    "repo_name",
    "edit_uri",
    "nav",
    "pages",
    "plugins",
    "strict",
    "dev_addr",
    "remote_branch",
    "remote_name",
    "watch",
    "hooks",
    "validation",
    "exclude_docs",
    "not_in_nav",
    "draft_docs",
];

/// Keys deserialized directly into plain fields.
const PLAIN_KEYS: &[&str] = &[
    "site_name",
    "site_url",
    "site_description",
    "site_author",
    "copyright",
    "docs_dir",
    "site_dir",
    "use_directory_urls",
    "extra_css",
    "extra_javascript",
    "repo_url",
    "repo_name",
    "edit_uri",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlainFields {
    site_name: Option<String>,
    site_url: Option<String>,
    site_description: Option<String>,
    site_author: Option<String>,
    copyright: Option<String>,
    docs_dir: Option<String>,
    site_dir: Option<String>,
    use_directory_urls: Option<bool>,
    extra_css: Vec<String>,
    extra_javascript: Vec<String>,
    repo_url: Option<String>,
    repo_name: Option<String>,
    edit_uri: Option<String>,
}

/// A documentation site manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Site name (required by the generator; empty when missing)
    pub site_name: String,
    pub site_description: Option<String>,
    pub site_author: Option<String>,
    pub site_url: Option<String>,
    pub copyright: Option<String>,

    /// Source directory, relative to the manifest
    pub docs_dir: String,

    /// Output directory, relative to the manifest
    pub site_dir: String,

    pub use_directory_urls: bool,

    pub theme: Theme,

    /// Stylesheets injected into every page, in order
    pub extra_css: Vec<String>,

    /// Scripts injected into every page, in order
    pub extra_javascript: Vec<String>,

    pub markdown_extensions: Extensions,
    pub google_analytics: Option<Analytics>,
    pub extra: Extra,

    pub repo_url: Option<String>,
    pub repo_name: Option<String>,

    /// Edit link template; `Some("")` disables edit links
    pub edit_uri: Option<String>,

    /// Navigation tree, from `nav` or the legacy `pages` key
    pub nav: Option<Nav>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            site_description: None,
            site_author: None,
            site_url: None,
            copyright: None,
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
            use_directory_urls: true,
            theme: Theme::default(),
            extra_css: Vec::new(),
            extra_javascript: Vec::new(),
            markdown_extensions: Extensions::default(),
            google_analytics: None,
            extra: Extra::default(),
            repo_url: None,
            repo_name: None,
            edit_uri: None,
            nav: None,
        }
    }
}

impl Manifest {
    /// Build the typed view from the raw top-level mapping.
    pub fn from_mapping(map: &Mapping) -> Result<Self, ManifestError> {
        let plain: Mapping = map
            .iter()
            .filter(|(key, value)| {
                key.as_str().is_some_and(|k| PLAIN_KEYS.contains(&k)) && !value.is_null()
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        let plain: PlainFields = serde_yaml::from_value(Value::Mapping(plain))?;

        let defaults = Self::default();
        let nav = match NavKey::detect(map)? {
            Some(key) => map
                .get(key.as_str())
                .map(|value| Nav::from_value(key.as_str(), value))
                .transpose()?,
            None => None,
        };

        Ok(Self {
            site_name: plain.site_name.unwrap_or_default(),
            site_description: plain.site_description,
            site_author: plain.site_author,
            site_url: plain.site_url,
            copyright: plain.copyright,
            docs_dir: plain.docs_dir.unwrap_or(defaults.docs_dir),
            site_dir: plain.site_dir.unwrap_or(defaults.site_dir),
            use_directory_urls: plain.use_directory_urls.unwrap_or(true),
            theme: parse_section(map, "theme", Theme::from_value)?.unwrap_or_default(),
            extra_css: plain.extra_css,
            extra_javascript: plain.extra_javascript,
            markdown_extensions: parse_section(map, "markdown_extensions", Extensions::from_value)?
                .unwrap_or_default(),
            google_analytics: parse_section(map, "google_analytics", Analytics::from_value)?,
            extra: parse_section(map, "extra", Extra::from_value)?.unwrap_or_default(),
            repo_url: plain.repo_url,
            repo_name: plain.repo_name,
            edit_uri: plain.edit_uri,
            nav,
        })
    }

    /// Repository display name, derived from the host when unset.
    pub fn repo_name(&self) -> Option<&str> {
        self.repo_name.as_deref().or_else(|| {
            self.repo_url
                .as_deref()
                .and_then(|url| RepoHost::from_url(url).default_name())
        })
    }

    /// Edit link template in effect, falling back to the host default.
    pub fn edit_uri(&self) -> Option<&str> {
        match &self.edit_uri {
            Some(uri) => Some(uri.as_str()),
            None => self
                .repo_url
                .as_deref()
                .and_then(|url| RepoHost::from_url(url).default_edit_uri()),
        }
    }

    /// "Edit this page" link for a document, if edit links are enabled.
    pub fn edit_url(&self, page: &str) -> Option<String> {
        repo::edit_url(self.repo_url.as_deref(), self.edit_uri()?, page)
    }

    /// Site URL of a document.
    pub fn page_url(&self, page: &str) -> String {
        page_url(page, self.use_directory_urls)
    }
}

fn parse_section<T>(
    map: &Mapping,
    key: &str,
    parse: impl FnOnce(&Value) -> Result<T, ManifestError>,
) -> Result<Option<T>, ManifestError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => parse(value).map(Some),
    }
}

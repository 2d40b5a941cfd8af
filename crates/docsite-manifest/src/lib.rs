//! Order-preserving model of documentation site manifests.
//!
//! This crate loads `mkdocs.yml` style manifests into a typed [`Manifest`]
//! while keeping the raw ordered mapping around, so a loaded document can be
//! written back out with every mapping and sequence in its original order.

pub mod document;
pub mod error;
pub mod extension;
pub mod extra;
pub mod manifest;
pub mod nav;
pub mod repo;
pub mod theme;
pub mod url;

pub use document::{ManifestDocument, NavKey};
pub use error::ManifestError;
pub use extension::{Extension, Extensions};
pub use extra::{Analytics, Extra, SocialLink};
pub use manifest::Manifest;
pub use nav::{Nav, NavEntry, NavPath};
pub use repo::RepoHost;
pub use theme::Theme;
pub use url::page_url;

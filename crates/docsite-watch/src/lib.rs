//! Watch mode for docsite.
//!
//! Validates a manifest, then validates it again every time the manifest or
//! anything under its docs directory changes.

mod session;
mod watcher;

pub use session::{WatchConfig, WatchSession};
pub use watcher::{ManifestWatcher, WatchEvent};

/// Errors that can occur while watching.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("File watch error: {0}")]
    Notify(#[from] notify::Error),
}

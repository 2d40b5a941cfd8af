//! File watching for re-validation.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use crate::WatchError;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The manifest itself was modified
    ManifestChanged(PathBuf),

    /// A markdown document was modified
    DocChanged(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Any other modification
    Other(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::ManifestChanged(p)
            | Self::DocChanged(p)
            | Self::Created(p)
            | Self::Deleted(p)
            | Self::Other(p) => p,
        }
    }
}

/// Watches a manifest and its docs directory.
pub struct ManifestWatcher {
    _watcher: RecommendedWatcher,
    docs_root: Option<PathBuf>,
}

impl ManifestWatcher {
    /// Watch the manifest's directory (non-recursively) and the docs tree.
    ///
    /// Returns the watcher and a channel to receive events. Events stop when
    /// the watcher is dropped.
    pub fn new(
        manifest: &Path,
        docs_root: &Path,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), WatchError> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })?;

        // Editors often replace the file, so watch its directory instead.
        let manifest_dir = match manifest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&manifest_dir, RecursiveMode::NonRecursive)?;

        let watched_docs = if docs_root.is_dir() {
            watcher.watch(docs_root, RecursiveMode::Recursive)?;
            Some(docs_root.to_path_buf())
        } else {
            tracing::warn!("Docs directory {} does not exist", docs_root.display());
            None
        };

        let manifest_path = match (manifest_dir.canonicalize(), manifest.file_name()) {
            (Ok(dir), Some(name)) => dir.join(name),
            _ => manifest.to_path_buf(),
        };

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    if let Some(e) = classify_event(path, &event.kind, &manifest_path) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                _watcher: watcher,
                docs_root: watched_docs,
            },
            async_rx,
        ))
    }

    /// Docs directory being watched, if it existed when watching started.
    pub fn docs_root(&self) -> Option<&Path> {
        self.docs_root.as_deref()
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind, manifest: &Path) -> Option<WatchEvent> {
    use notify::EventKind;

    let is_manifest = path == manifest
        || (path.file_name() == manifest.file_name()
            && path.parent().and_then(|p| p.canonicalize().ok()).as_deref()
                == manifest.parent());
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) if is_manifest => {
            Some(WatchEvent::ManifestChanged(path.to_path_buf()))
        }
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => {
            if ext == "md" || ext == "markdown" {
                Some(WatchEvent::DocChanged(path.to_path_buf()))
            } else {
                Some(WatchEvent::Other(path.to_path_buf()))
            }
        }
        _ => None,
    }
}

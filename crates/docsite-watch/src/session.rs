//! Watch session: validate, wait for changes, validate again.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use docsite_check::{CheckConfig, CheckError, Checker, Report};
use docsite_manifest::ManifestDocument;
use tokio::sync::mpsc::Receiver;

use crate::watcher::{ManifestWatcher, WatchEvent};
use crate::WatchError;

/// Configuration for a watch session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Manifest file to validate
    pub manifest_path: PathBuf,

    /// Rule configuration
    pub check: CheckConfig,

    /// Quiet period that collapses bursts of events into one run
    pub settle: Duration,
}

impl WatchConfig {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            check: CheckConfig::default(),
            settle: Duration::from_millis(100),
        }
    }
}

/// Re-runs the checker whenever the manifest or its documents change.
pub struct WatchSession {
    config: WatchConfig,
    checker: Checker,
}

impl WatchSession {
    pub fn new(config: WatchConfig) -> Self {
        let checker = Checker::new(config.check.clone());
        Self { config, checker }
    }

    /// Validate the manifest once.
    pub fn check_now(&self) -> Result<Report, CheckError> {
        self.checker.check_file(&self.config.manifest_path)
    }

    /// Validate, then re-validate on every change until `shutdown` resolves.
    ///
    /// Each outcome, including load failures, is handed to `on_report`. The
    /// docs watch is rebuilt when `docs_dir` moves or the directory appears
    /// or disappears.
    pub async fn run<F, S>(self, mut on_report: F, shutdown: S) -> Result<(), WatchError>
    where
        F: FnMut(Result<Report, CheckError>),
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        on_report(self.check_now());
        let (mut watcher, mut rx) = self.watch(&self.docs_root())?;

        loop {
            let event = tokio::select! {
                _ = &mut shutdown => break,
                event = rx.recv() => event,
            };
            let Some(event) = event else {
                break;
            };

            let events = collect_burst(event, &mut rx, self.config.settle).await;
            for event in &events {
                tracing::debug!("Change detected: {}", event.path().display());
            }

            let docs_root = self.docs_root();
            if needs_rewatch(watcher.docs_root(), &docs_root) {
                tracing::info!("Docs directory is now {}", docs_root.display());
                (watcher, rx) = self.watch(&docs_root)?;
            }

            on_report(self.check_now());
        }

        // Keep watcher alive
        drop(watcher);
        Ok(())
    }

    fn watch(
        &self,
        docs_root: &Path,
    ) -> Result<(ManifestWatcher, Receiver<WatchEvent>), WatchError> {
        let watched = ManifestWatcher::new(&self.config.manifest_path, docs_root)?;
        tracing::info!(
            "Watching {} and {}",
            self.config.manifest_path.display(),
            docs_root.display()
        );
        Ok(watched)
    }

    /// Docs directory of the manifest, or the default beside it when the
    /// manifest cannot be loaded.
    fn docs_root(&self) -> PathBuf {
        match ManifestDocument::load(&self.config.manifest_path) {
            Ok(doc) => doc.docs_root(),
            Err(_) => default_docs_root(&self.config.manifest_path),
        }
    }
}

fn default_docs_root(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("docs")
}

/// Whether the docs watch no longer matches the docs directory on disk.
fn needs_rewatch(watched: Option<&Path>, docs_root: &Path) -> bool {
    match watched {
        Some(watched) => watched != docs_root || !docs_root.is_dir(),
        None => docs_root.is_dir(),
    }
}

/// Gather events arriving within `settle` of each other.
async fn collect_burst(
    first: WatchEvent,
    rx: &mut Receiver<WatchEvent>,
    settle: Duration,
) -> Vec<WatchEvent> {
    let mut events = vec![first];
    while let Ok(Some(event)) = tokio::time::timeout(settle, rx.recv()).await {
        events.push(event);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    fn write_site(root: &Path) -> PathBuf {
        let manifest = root.join("mkdocs.yml");
        fs::write(&manifest, "site_name: NabBot\nnav:\n  - Home: index.md\n").unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        manifest
    }

    #[test]
    fn check_now_reports_missing_page() {
        let temp = tempdir().unwrap();
        let manifest = write_site(temp.path());

        let session = WatchSession::new(WatchConfig::new(&manifest));
        let report = session.check_now().unwrap();

        assert!(report.has_errors());
        assert_eq!(report.diagnostics()[0].code, "nav-missing-file");
    }

    #[test]
    fn falls_back_to_default_docs_root() {
        let temp = tempdir().unwrap();
        let session = WatchSession::new(WatchConfig::new(temp.path().join("mkdocs.yml")));

        assert_eq!(session.docs_root(), temp.path().join("docs"));
    }

    type Codes = Vec<&'static str>;

    fn spawn_session(
        manifest: &Path,
    ) -> (
        mpsc::UnboundedReceiver<Codes>,
        tokio::sync::oneshot::Sender<()>,
        tokio::task::JoinHandle<Result<(), WatchError>>,
    ) {
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let session = WatchSession::new(WatchConfig::new(manifest));
        let handle = tokio::spawn(session.run(
            move |result: Result<Report, CheckError>| {
                let codes = match result {
                    Ok(report) => report.diagnostics().iter().map(|d| d.code).collect(),
                    Err(_) => vec!["load-error"],
                };
                let _ = report_tx.send(codes);
            },
            async move {
                let _ = stop_rx.await;
            },
        ));
        (report_rx, stop_tx, handle)
    }

    /// Receive reports until one carries exactly `wanted`.
    async fn wait_for(rx: &mut mpsc::UnboundedReceiver<Codes>, wanted: &[&str]) -> bool {
        let found = async {
            while let Some(codes) = rx.recv().await {
                if codes == wanted {
                    return true;
                }
            }
            false
        };
        tokio::time::timeout(Duration::from_secs(5), found)
            .await
            .unwrap_or(false)
    }

    #[test]
    fn rewatches_when_docs_dir_changes() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let content = temp.path().join("content");

        assert!(!needs_rewatch(None, &docs));
        fs::create_dir_all(&docs).unwrap();
        assert!(needs_rewatch(None, &docs));
        assert!(!needs_rewatch(Some(&docs), &docs));
        assert!(needs_rewatch(Some(&docs), &content));
        fs::remove_dir(&docs).unwrap();
        assert!(needs_rewatch(Some(&docs), &docs));
    }

    #[tokio::test]
    async fn picks_up_docs_dir_created_later() {
        let temp = tempdir().unwrap();
        let manifest = temp.path().join("mkdocs.yml");
        fs::write(&manifest, "site_name: NabBot\nnav:\n  - Home: index.md\n").unwrap();
        let docs = temp.path().join("docs");

        let (mut reports, stop, handle) = spawn_session(&manifest);

        let first = tokio::time::timeout(Duration::from_secs(3), reports.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(first.contains(&"missing-docs-dir"), "{:?}", first);

        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::create_dir(&docs).unwrap();
        assert!(wait_for(&mut reports, &["nav-missing-file"]).await);

        // Only seen if the new directory is being watched
        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(docs.join("index.md"), "# Home\n").unwrap();
        assert!(wait_for(&mut reports, &[]).await);

        let _ = stop.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn follows_docs_dir_change() {
        let temp = tempdir().unwrap();
        let manifest = temp.path().join("mkdocs.yml");
        fs::write(
            &manifest,
            "site_name: NabBot\ndocs_dir: docs\nnav:\n  - Home: index.md\n",
        )
        .unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(&content).unwrap();

        let (mut reports, stop, handle) = spawn_session(&manifest);

        let first = tokio::time::timeout(Duration::from_secs(3), reports.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(vec!["nav-missing-file"]));

        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(
            &manifest,
            "site_name: NabBot\ndocs_dir: content\nnav:\n  - Home: index.md\n",
        )
        .unwrap();
        assert!(wait_for(&mut reports, &["nav-missing-file"]).await);

        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(content.join("index.md"), "# Home\n").unwrap();
        assert!(wait_for(&mut reports, &[]).await);

        let _ = stop.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn collects_bursts() {
        let (tx, mut rx) = mpsc::channel(10);
        tx.send(WatchEvent::DocChanged(PathBuf::from("b.md")))
            .await
            .unwrap();
        tx.send(WatchEvent::Created(PathBuf::from("c.md")))
            .await
            .unwrap();

        let events = collect_burst(
            WatchEvent::DocChanged(PathBuf::from("a.md")),
            &mut rx,
            Duration::from_millis(20),
        )
        .await;

        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn revalidates_after_fix() {
        let temp = tempdir().unwrap();
        let manifest = write_site(temp.path());
        let docs = temp.path().join("docs");

        let (report_tx, mut report_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();

        let session = WatchSession::new(WatchConfig::new(&manifest));
        let handle = tokio::spawn(session.run(
            move |result| {
                let errors = result.map(|r| r.has_errors()).unwrap_or(true);
                let _ = report_tx.send(errors);
            },
            async move {
                let _ = stop_rx.await;
            },
        ));

        let first = tokio::time::timeout(Duration::from_secs(3), report_rx.recv())
            .await
            .unwrap();
        assert_eq!(first, Some(true));

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(200)).await;
        fs::write(docs.join("index.md"), "# Home\n").unwrap();

        let second = tokio::time::timeout(Duration::from_secs(5), report_rx.recv())
            .await
            .unwrap();
        assert_eq!(second, Some(false));

        let _ = stop_tx.send(());
        handle.await.unwrap().unwrap();
    }
}

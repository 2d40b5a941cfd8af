//! Watch mode command.

use std::path::Path;

use anyhow::Result;
use docsite_check::CheckConfig;
use docsite_watch::{WatchConfig, WatchSession};

/// Run the watch command until interrupted.
pub async fn run(manifest: &Path, check: CheckConfig) -> Result<()> {
    let config = WatchConfig {
        check,
        ..WatchConfig::new(manifest)
    };

    tracing::info!("Press Ctrl+C to stop");

    WatchSession::new(config)
        .run(
            |result| match result {
                Ok(report) if report.is_empty() => tracing::info!("No problems found"),
                Ok(report) => print!("{}", report.render()),
                Err(e) => tracing::error!("{}", e),
            },
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
        )
        .await?;

    tracing::info!("Stopped watching");
    Ok(())
}

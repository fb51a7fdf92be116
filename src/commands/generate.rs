//! Generate site data

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::{BuildReport, Generator};
use crate::{Folio, CONFIG_FILE};

/// Ingest content and generate every page.
///
/// The content store lives for this one pass only.
pub fn run(folio: &Folio) -> Result<BuildReport> {
    let start = std::time::Instant::now();

    let store = folio.load_store()?;
    let report = Generator::new(folio, &store).generate()?;

    let duration = start.elapsed();
    if report.is_clean() {
        tracing::info!(
            "Generated {} pages, {} projects, {} assets in {:.2}s",
            report.pages,
            report.projects,
            report.assets,
            duration.as_secs_f64()
        );
    } else {
        tracing::warn!(
            "Generated {} pages in {:.2}s; {} failed: {}",
            report.pages,
            duration.as_secs_f64(),
            report.failed.len(),
            report.failed.join(", ")
        );
    }

    Ok(report)
}

/// Watch for file changes and regenerate from scratch
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(folio.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(config_path.as_ref(), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce bursts of events from a single save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // Reload config too: it may be the file that changed
                    let result = Folio::new(&folio.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

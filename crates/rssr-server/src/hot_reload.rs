use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tower_livereload::Reloader;
use tracing::{error, info, warn};

/// Type of file change that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Rust sources: the binary must be rebuilt before the change shows up
    SourceCode,
    /// Anything served as-is (styles, scripts, images)
    Asset,
}

impl ChangeType {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("rs") => ChangeType::SourceCode,
            _ => ChangeType::Asset,
        }
    }
}

/// Represents a file change event
#[derive(Debug, Clone)]
pub struct FileChange {
    pub path: PathBuf,
    pub change_type: ChangeType,
}

/// Hot reload watcher that monitors file system changes
pub struct HotReloadWatcher {
    tx: broadcast::Sender<FileChange>,
    _watcher: notify::RecommendedWatcher,
}

impl HotReloadWatcher {
    /// Create a new hot reload watcher
    pub fn new(watch_paths: &[PathBuf]) -> Result<Self> {
        let (tx, _) = broadcast::channel(100);
        let tx_clone = tx.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                    ) {
                        return;
                    }
                    for path in event.paths {
                        let change_type = ChangeType::of(&path);
                        // Ignore send errors: no receivers yet
                        let _ = tx_clone.send(FileChange { path, change_type });
                    }
                }
                Err(e) => error!("Watch error: {:?}", e),
            }
        })?;

        for path in watch_paths {
            if path.exists() {
                watcher.watch(path, RecursiveMode::Recursive)?;
                info!("Watching: {:?}", path);
            } else {
                warn!("Path does not exist: {:?}", path);
            }
        }

        Ok(Self {
            tx,
            _watcher: watcher,
        })
    }

    /// Subscribe to file change events
    pub fn subscribe(&self) -> broadcast::Receiver<FileChange> {
        self.tx.subscribe()
    }
}

/// Watch `watch_paths` and ask connected browsers for a full reload on every change
///
/// The watcher lives as long as the spawned task.
pub fn spawn(watch_paths: &[String], reloader: Reloader) -> Result<()> {
    let paths: Vec<PathBuf> = watch_paths.iter().map(PathBuf::from).collect();
    let watcher = HotReloadWatcher::new(&paths)?;
    let mut rx = watcher.subscribe();

    tokio::spawn(async move {
        let _watcher = watcher;
        loop {
            match rx.recv().await {
                Ok(change) => {
                    match change.change_type {
                        ChangeType::SourceCode => {
                            info!("Source changed: {:?} (recompile required)", change.path)
                        }
                        ChangeType::Asset => info!("Asset changed: {:?}", change.path),
                    }
                    reloader.reload();
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "dropped file change events");
                    reloader.reload();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    Ok(())
}

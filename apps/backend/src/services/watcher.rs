//! File system watcher that invalidates the cached table when the data file
//! changes on disk.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use svp_core::{CatalogCache, DataSource};

/// Watches the directory holding the data file.
pub struct SourceWatcher {
    watcher: Option<RecommendedWatcher>,
    stop_tx: Option<Sender<()>>,
    path: PathBuf,
}

impl SourceWatcher {
    /// Start watching `path`; events touching it invalidate its cache entry.
    pub fn start(path: PathBuf, cache: CatalogCache) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();

        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<Event>| {
                if let Ok(event) = result {
                    let _ = tx.send(event);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        // the file may be replaced, so watch its directory
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "watching data file");

        let watched = path.clone();
        thread::spawn(move || {
            Self::event_loop(rx, stop_rx, watched, cache);
        });

        Ok(Self {
            watcher: Some(watcher),
            stop_tx: Some(stop_tx),
            path,
        })
    }

    pub fn is_running(&self) -> bool {
        self.watcher.is_some()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
            tracing::info!(path = %self.path.display(), "stopped watching data file");
        }
        self.watcher = None;
    }

    fn event_loop(rx: Receiver<Event>, stop_rx: Receiver<()>, path: PathBuf, cache: CatalogCache) {
        let source = DataSource::File(path.clone());
        loop {
            if stop_rx.try_recv().is_ok() {
                break;
            }

            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => {
                    if Self::touches(&event, &path) {
                        tracing::debug!(kind = ?event.kind, "data file changed");
                        cache.invalidate(&source);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    /// Content-affecting event on the watched file.
    fn touches(event: &Event, path: &Path) -> bool {
        let relevant = matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        );
        relevant && event.paths.iter().any(|p| same_file(p, path))
    }
}

impl Drop for SourceWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Compare by file name and parent, tolerating relative configured paths.
fn same_file(event_path: &Path, watched: &Path) -> bool {
    if event_path == watched {
        return true;
    }
    match (event_path.canonicalize(), watched.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        // a removed file cannot be canonicalized
        _ => event_path.file_name().is_some() && event_path.file_name() == watched.file_name(),
    }
}

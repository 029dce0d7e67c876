//! Live-reload watch loop
//!
//! A single recursive watch on the locale root feeds change events into a
//! channel; a dedicated thread re-parses only the affected file or subtree
//! and republishes the (store, matcher) snapshot atomically. Event paths
//! are re-checked against the live filesystem before acting, so stale
//! events for deleted-and-recreated directories cannot act on dead state.

use crate::error::CatalogError;
use crate::scanner::{self, SourceSet};
use crate::table::TableState;
use arc_swap::ArcSwap;
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

/// Scoped ownership of the watch loop. Closing (or dropping) the handle
/// stops event delivery and joins the loop thread, letting an in-flight
/// reload finish first.
pub(crate) struct WatchHandle {
    shutdown_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// Register a recursive watch on `root` and start the reload thread.
    pub(crate) fn spawn(
        root: &Path,
        state: Arc<ArcSwap<TableState>>,
        sources: Arc<Mutex<SourceSet>>,
    ) -> Result<Self, CatalogError> {
        let (event_tx, event_rx) = unbounded();
        let mut watcher: RecommendedWatcher = notify::recommended_watcher(move |result| {
            let _ = event_tx.send(result);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;

        let (shutdown_tx, shutdown_rx) = bounded(1);
        let root = root.to_path_buf();
        let thread = std::thread::Builder::new()
            .name("locserver-watch".to_string())
            .spawn(move || {
                // The notify watcher lives on this thread; dropping it when
                // the loop exits unregisters the filesystem watch.
                let _watcher = watcher;
                watch_loop(&root, &event_rx, &shutdown_rx, &state, &sources);
            })?;

        Ok(Self {
            shutdown_tx,
            thread: Some(thread),
        })
    }

    /// Stop receiving events and wait for the loop thread to finish.
    pub(crate) fn close(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn watch_loop(
    root: &Path,
    events: &Receiver<notify::Result<notify::Event>>,
    shutdown: &Receiver<()>,
    state: &ArcSwap<TableState>,
    sources: &Mutex<SourceSet>,
) {
    info!(root = %root.display(), "watching locale root");

    loop {
        select! {
            recv(events) -> message => match message {
                Ok(Ok(event)) => handle_event(root, &event, state, sources),
                // Watch-stream errors are transient; the loop keeps running.
                Ok(Err(err)) => {
                    error!(error = %err, "error from directory watcher, not reloading");
                }
                Err(_) => break,
            },
            recv(shutdown) -> _ => break,
        }
    }

    debug!(root = %root.display(), "watch loop stopped");
}

fn handle_event(
    root: &Path,
    event: &notify::Event,
    state: &ArcSwap<TableState>,
    sources: &Mutex<SourceSet>,
) {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }

    let mut sources = sources.lock();
    let mut changed = false;
    for path in &event.paths {
        changed |= apply_path(root, path, &mut sources);
    }
    if !changed {
        return;
    }

    match sources.snapshot() {
        Some((store, matcher)) => {
            info!(tags = ?store.tags(), "republishing catalogs after reload");
            state.store(Arc::new(TableState { store, matcher }));
        }
        None => {
            warn!("reload left no loaded language tags; keeping previous catalogs");
        }
    }
}

/// Apply one event path to the source set. Returns whether anything changed.
fn apply_path(root: &Path, path: &Path, sources: &mut SourceSet) -> bool {
    if path == root {
        return false;
    }

    if path.is_dir() {
        // New or renamed-in directory: rescan the whole subtree.
        sources.remove_subtree(path);
        let mut errors = Vec::new();
        scanner::scan_dir(path, sources, &mut errors);
        for err in &errors {
            warn!(error = %err, "failed to load locale file during reload");
        }
        info!(directory = %path.display(), "rescanned locale directory");
        true
    } else if path.is_file() {
        match scanner::parse_source_file(path) {
            None => false,
            Some(Ok(file)) => {
                info!(path = %path.display(), tag = %file.tag, "reloaded locale file");
                sources.insert(path.to_path_buf(), file);
                true
            }
            Some(Err(err)) => {
                // Keep the previous contribution rather than dropping keys
                // because of one bad write.
                error!(path = %path.display(), error = %err, "error reloading, not reloaded");
                false
            }
        }
    } else if sources.remove_subtree(path) {
        info!(path = %path.display(), "dropped contribution of removed path");
        true
    } else {
        false
    }
}

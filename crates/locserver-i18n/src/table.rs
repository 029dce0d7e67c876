//! The top-level string table: load, resolve, fetch, close

use crate::catalog::{Catalog, CatalogStore};
use crate::error::{CatalogError, ScanError};
use crate::matcher::TagMatcher;
use crate::scanner::{self, SourceSet};
use crate::tag::LanguageTag;
use crate::watcher::WatchHandle;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The jointly published store + matcher snapshot. Always replaced as one
/// unit so a concurrent reader never sees a matcher that knows a tag the
/// store lacks, or vice versa.
#[derive(Debug)]
pub(crate) struct TableState {
    pub(crate) store: CatalogStore,
    pub(crate) matcher: TagMatcher,
}

/// Loaded message catalogs for every language found under a locale root,
/// with optional live reload.
///
/// Readers go through a copy-on-write snapshot: `resolve` and `catalog_for`
/// never block on reloads and always observe a fully consistent (store,
/// matcher) pair.
pub struct StringTable {
    root: PathBuf,
    state: Arc<ArcSwap<TableState>>,
    // Watcher-side bookkeeping of per-file contributions. Held here so the
    // watch loop and the table share one lifetime.
    #[allow(dead_code)]
    sources: Arc<Mutex<SourceSet>>,
    scan_errors: Vec<ScanError>,
    watcher: Option<WatchHandle>,
}

impl StringTable {
    /// Load every language under `root`, optionally keeping the table
    /// current as files change on disk.
    ///
    /// The initial scan is synchronous and completes before this returns.
    /// Per-file failures do not abort the load and are available through
    /// [`StringTable::scan_errors`]; the load is fatal only if the root is
    /// unreadable, the watcher cannot be created, or no language tag loads
    /// at all (`NoLanguagesFound`).
    pub fn load(root: impl AsRef<Path>, watch: bool) -> Result<Self, CatalogError> {
        // Watch events carry canonical absolute paths; scanning a relative
        // or symlinked root as given would key contributions under paths no
        // event ever matches, so reloads could never supersede them.
        let root = root.as_ref().canonicalize()?;
        info!(root = %root.display(), "loading locales");

        let (sources, scan_errors) = scanner::scan_root(&root)?;
        let (store, matcher) = sources
            .snapshot()
            .ok_or_else(|| CatalogError::NoLanguagesFound(root.clone()))?;

        info!(tags = ?store.tags(), "creating matcher");

        let state = Arc::new(ArcSwap::from_pointee(TableState { store, matcher }));
        let sources = Arc::new(Mutex::new(sources));

        let watcher = if watch {
            Some(WatchHandle::spawn(
                &root,
                Arc::clone(&state),
                Arc::clone(&sources),
            )?)
        } else {
            None
        };

        Ok(Self {
            root,
            state,
            sources,
            scan_errors,
            watcher,
        })
    }

    /// Resolve a prioritized list of preference strings to the best loaded
    /// tag. Never fails; falls back to the matcher's default.
    ///
    /// Callers assemble the list in precedence order. The documented order
    /// for HTTP consumers is: explicit query parameter, then cookie value,
    /// then Accept-Language entries in header order.
    pub fn resolve<S: AsRef<str>>(&self, preferences: &[S]) -> LanguageTag {
        self.state.load().matcher.resolve(preferences).clone()
    }

    /// Fetch the catalog for an exact tag.
    ///
    /// Returns [`CatalogError::NotFound`] if no catalog is loaded for the
    /// tag; there is no silent fallback for consumer-specified exact tags.
    pub fn catalog_for(&self, tag: &LanguageTag) -> Result<Arc<Catalog>, CatalogError> {
        self.state
            .load()
            .store
            .get(tag)
            .ok_or_else(|| CatalogError::NotFound(tag.canonical().to_string()))
    }

    /// The currently served tags, in canonical sort order.
    pub fn tags(&self) -> Vec<LanguageTag> {
        self.state.load().matcher.tags().to_vec()
    }

    /// The tag `resolve` falls back to when nothing matches.
    pub fn default_tag(&self) -> LanguageTag {
        self.state.load().matcher.default_tag().clone()
    }

    /// Per-file failures collected during the initial scan.
    pub fn scan_errors(&self) -> &[ScanError] {
        &self.scan_errors
    }

    /// The locale root this table was loaded from, in canonical form.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether live reload is active.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Stop the watch loop, waiting for an in-flight reload to finish.
    /// Dropping the table has the same effect.
    pub fn close(mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.close();
        }
    }
}

impl std::fmt::Debug for StringTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringTable")
            .field("root", &self.root)
            .field("tags", &self.state.load().store.tags())
            .field("watching", &self.watcher.is_some())
            .finish()
    }
}

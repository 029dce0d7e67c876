//! Recursive locale-root scanning and per-file source bookkeeping

use crate::catalog::{Catalog, CatalogStore};
use crate::error::{CatalogError, ScanError};
use crate::format::format_for_path;
use crate::matcher::TagMatcher;
use crate::tag::LanguageTag;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

/// One successfully parsed leaf file: its resolved tag and the entries it
/// contributes to that tag's catalog.
#[derive(Debug)]
pub(crate) struct SourceFile {
    pub tag: LanguageTag,
    pub entries: HashMap<String, String>,
    pub modified: SystemTime,
}

/// Bookkeeping for every parsed file under the locale root, keyed by path.
///
/// A tag's catalog is the merge of all file contributions for that tag, so
/// reloading or removing one file leaves sibling files' entries intact.
/// `BTreeMap` keeps paths sorted, which makes duplicate-key merges
/// deterministic (the last path in sort order wins).
#[derive(Debug, Default)]
pub(crate) struct SourceSet {
    files: BTreeMap<PathBuf, SourceFile>,
}

impl SourceSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: PathBuf, file: SourceFile) {
        self.files.insert(path, file);
    }

    /// Drop the contribution of `path` and of anything beneath it. Returns
    /// whether any contribution was removed.
    pub(crate) fn remove_subtree(&mut self, path: &Path) -> bool {
        let before = self.files.len();
        // starts_with also matches the path itself.
        self.files.retain(|p, _| !p.starts_with(path));
        self.files.len() != before
    }

    /// Build a consistent (store, matcher) pair from the current files, or
    /// `None` if no file contributes any tag.
    pub(crate) fn snapshot(&self) -> Option<(CatalogStore, TagMatcher)> {
        let mut merged: BTreeMap<String, (LanguageTag, HashMap<String, String>, SystemTime)> =
            BTreeMap::new();

        for file in self.files.values() {
            let slot = merged
                .entry(file.tag.canonical().to_string())
                .or_insert_with(|| (file.tag.clone(), HashMap::new(), file.modified));
            for (key, value) in &file.entries {
                slot.1.insert(key.clone(), value.clone());
            }
            if file.modified > slot.2 {
                slot.2 = file.modified;
            }
        }

        let tags: Vec<LanguageTag> = merged.values().map(|(tag, _, _)| tag.clone()).collect();
        let matcher = TagMatcher::new(tags)?;

        let catalogs = merged
            .into_iter()
            .map(|(canonical, (_, entries, modified))| {
                (canonical, Arc::new(Catalog::new(entries, modified)))
            })
            .collect();

        Some((CatalogStore::new(catalogs), matcher))
    }
}

/// Full initial load: walk the locale root and parse every recognized file.
///
/// Per-file failures are aggregated and never abort sibling work; only an
/// unreadable root is fatal here. The caller decides whether an empty result
/// is fatal.
pub(crate) fn scan_root(root: &Path) -> Result<(SourceSet, Vec<ScanError>), CatalogError> {
    let mut sources = SourceSet::new();
    let mut errors = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            scan_dir(&path, &mut sources, &mut errors);
        } else {
            debug!(path = %path.display(), "skipping file outside a locale directory");
        }
    }

    Ok((sources, errors))
}

/// Recursively scan one directory, treating its name as a candidate tag for
/// files whose format cannot supply its own.
pub(crate) fn scan_dir(dir: &Path, sources: &mut SourceSet, errors: &mut Vec<ScanError>) {
    if directory_tag(dir).is_none() {
        warn!(
            directory = %dir.display(),
            "directory name is not a language tag; relying on embedded tags for its files"
        );
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            errors.push(ScanError {
                path: dir.to_path_buf(),
                source: err.into(),
            });
            return;
        }
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                errors.push(ScanError {
                    path: dir.to_path_buf(),
                    source: err.into(),
                });
                continue;
            }
        };

        if path.is_dir() {
            scan_dir(&path, sources, errors);
        } else {
            match parse_source_file(&path) {
                None => debug!(path = %path.display(), "skipping unrecognized file"),
                Some(Ok(file)) => sources.insert(path, file),
                Some(Err(source)) => {
                    warn!(path = %path.display(), error = %source, "failed to load locale file");
                    errors.push(ScanError { path, source });
                }
            }
        }
    }
}

/// Parse one leaf file with the parser its extension selects.
///
/// Returns `None` for extensions no parser claims. The tag hint for formats
/// that need one is the file's parent directory name.
pub(crate) fn parse_source_file(path: &Path) -> Option<Result<SourceFile, CatalogError>> {
    let format = format_for_path(path)?;

    let tag_hint = if format.requires_external_tag() {
        match path.parent().and_then(directory_tag) {
            Some(tag) => Some(tag),
            None => {
                let parent_name = path
                    .parent()
                    .and_then(Path::file_name)
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                return Some(Err(CatalogError::InvalidTag(parent_name)));
            }
        }
    } else {
        None
    };

    Some((|| {
        let bytes = fs::read(path)?;
        let modified = fs::metadata(path)?
            .modified()
            .unwrap_or_else(|_| SystemTime::now());

        let parsed = format.parse(&bytes, tag_hint.as_ref(), modified)?;
        Ok(SourceFile {
            tag: parsed.tag,
            entries: parsed.entries,
            modified: parsed.modified,
        })
    })())
}

/// The candidate tag a directory name supplies, if it parses as one.
fn directory_tag(dir: &Path) -> Option<LanguageTag> {
    let name = dir.file_name()?.to_str()?;
    LanguageTag::parse(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(tag: &str, pairs: &[(&str, &str)], modified: SystemTime) -> SourceFile {
        SourceFile {
            tag: LanguageTag::parse(tag).unwrap(),
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            modified,
        }
    }

    #[test]
    fn snapshot_merges_files_for_one_tag() {
        let mut set = SourceSet::new();
        let t = SystemTime::UNIX_EPOCH;
        set.insert(PathBuf::from("/l/en/a.po"), source("en", &[("a", "1")], t));
        set.insert(PathBuf::from("/l/en/b.po"), source("en", &[("b", "2")], t));

        let (store, matcher) = set.snapshot().unwrap();
        let en = LanguageTag::parse("en").unwrap();
        let catalog = store.get(&en).unwrap();
        assert_eq!(catalog.get("a"), Some("1"));
        assert_eq!(catalog.get("b"), Some("2"));
        assert_eq!(matcher.tags().len(), 1);
    }

    #[test]
    fn snapshot_duplicate_keys_resolve_by_path_order() {
        let mut set = SourceSet::new();
        let t = SystemTime::UNIX_EPOCH;
        set.insert(PathBuf::from("/l/en/a.po"), source("en", &[("k", "first")], t));
        set.insert(PathBuf::from("/l/en/z.po"), source("en", &[("k", "last")], t));

        let (store, _) = set.snapshot().unwrap();
        let en = LanguageTag::parse("en").unwrap();
        assert_eq!(store.get(&en).unwrap().get("k"), Some("last"));
    }

    #[test]
    fn remove_subtree_drops_contained_files() {
        let mut set = SourceSet::new();
        let t = SystemTime::UNIX_EPOCH;
        set.insert(PathBuf::from("/l/en/a.po"), source("en", &[("a", "1")], t));
        set.insert(PathBuf::from("/l/de/b.po"), source("de", &[("b", "2")], t));

        assert!(set.remove_subtree(Path::new("/l/en")));
        let (store, matcher) = set.snapshot().unwrap();
        assert_eq!(store.tags(), vec!["de"]);
        assert_eq!(matcher.tags().len(), 1);

        // An exact file path is removed too, not just directory prefixes.
        assert!(set.remove_subtree(Path::new("/l/de/b.po")));
        assert!(set.snapshot().is_none());

        assert!(!set.remove_subtree(Path::new("/l/fr")));
    }

    #[test]
    fn empty_set_has_no_snapshot() {
        assert!(SourceSet::new().snapshot().is_none());
    }
}

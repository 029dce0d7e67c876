//! Fixture builders for locale directory trees.
//!
//! Used by integration tests across the workspace to lay out temporary
//! `<root>/<tag>/<file>` trees in the three supported on-disk formats.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary locale root directory with helpers for writing catalog files.
#[derive(Debug)]
pub struct LocaleRoot {
    dir: TempDir,
}

impl LocaleRoot {
    /// Create an empty temporary locale root.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp locale root"),
        }
    }

    /// The root path to hand to the loader.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write raw bytes to `rel` under the root, creating parent directories.
    pub fn write_raw(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create locale subdirectory");
        }
        fs::write(&path, contents).expect("failed to write locale file");
        path
    }

    /// Write a gotext-style JSON message file embedding `language`.
    pub fn write_gotext(&self, rel: &str, language: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let messages: Vec<String> = pairs
            .iter()
            .map(|(id, translation)| {
                format!(
                    r#"{{"id": "{id}", "message": "{id}", "translation": "{translation}"}}"#
                )
            })
            .collect();
        let payload = format!(
            r#"{{"language": "{language}", "messages": [{}]}}"#,
            messages.join(",\n")
        );
        self.write_raw(rel, &payload)
    }

    /// Write a gettext PO file of single-line msgid/msgstr pairs.
    pub fn write_po(&self, rel: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let mut body = String::new();
        for (id, translation) in pairs {
            body.push_str(&format!("msgid \"{id}\"\nmsgstr \"{translation}\"\n\n"));
        }
        self.write_raw(rel, &body)
    }

    /// Write an XLIFF 2.0 file with one unit per pair and `trg_lang` as target.
    pub fn write_xliff(&self, rel: &str, trg_lang: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let mut units = String::new();
        for (id, translation) in pairs {
            units.push_str(&format!(
                "  <unit>\n   <segment id=\"{id}\">\n    <source>{id}</source>\n    <target>{translation}</target>\n   </segment>\n  </unit>\n"
            ));
        }
        let payload = format!(
            "<xliff xmlns=\"urn:oasis:names:tc:xliff:document:2.0\" version=\"2.0\" srcLang=\"en\" trgLang=\"{trg_lang}\">\n <file id=\"f1\">\n{units} </file>\n</xliff>"
        );
        self.write_raw(rel, &payload)
    }

    /// Remove a file or directory tree under the root.
    pub fn remove(&self, rel: &str) {
        let path = self.dir.path().join(rel);
        if path.is_dir() {
            fs::remove_dir_all(&path).expect("failed to remove locale directory");
        } else {
            fs::remove_file(&path).expect("failed to remove locale file");
        }
    }
}

impl Default for LocaleRoot {
    fn default() -> Self {
        Self::new()
    }
}

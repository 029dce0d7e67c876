//! gettext PO text files
//!
//! PO files do not embed a language tag, so the caller must supply one
//! (normally inferred from the parent directory name).
//!
//! Known limitation: entries are extracted by scanning for single-line
//! `msgid "..."` / `msgstr "..."` pairs. Multi-line message bodies and
//! escaped quotes inside them are not supported and such entries are
//! skipped. The gettext header entry (`msgid ""`) is skipped for the same
//! reason.

use crate::error::CatalogError;
use crate::format::{MessageFormat, ParsedFile};
use crate::tag::LanguageTag;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::debug;

static ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^[ \t]*msgid "(.+)"\r?\n[ \t]*msgstr "(.+)""#)
        .expect("static PO pattern is valid")
});

/// Parser for gettext PO files. Requires an external language tag; a file
/// with zero matching entries parses to an empty catalog, not an error.
#[derive(Debug, Default)]
pub struct PoFormat;

impl MessageFormat for PoFormat {
    fn requires_external_tag(&self) -> bool {
        true
    }

    fn parse(
        &self,
        bytes: &[u8],
        tag_hint: Option<&LanguageTag>,
        modified: SystemTime,
    ) -> Result<ParsedFile, CatalogError> {
        let tag = tag_hint.ok_or(CatalogError::TagRequired)?.clone();

        let text = std::str::from_utf8(bytes)
            .map_err(|err| CatalogError::Malformed(format!("PO file is not UTF-8: {err}")))?;

        let mut entries = HashMap::new();
        for captures in ENTRY_PATTERN.captures_iter(text) {
            let id = captures[1].to_string();
            let translation = captures[2].to_string();
            debug!(tag = %tag, id = %id, translation = %translation, "loading string");
            entries.insert(id, translation);
        }

        Ok(ParsedFile { tag, entries, modified })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "msgid \"\"\nmsgstr \"\"\n\"Language: en_US\\n\"\n\"MIME-Version: 1.0\\n\"\n";

    fn parse(data: &str, hint: &str) -> Result<ParsedFile, CatalogError> {
        let tag = LanguageTag::parse(hint).unwrap();
        PoFormat.parse(data.as_bytes(), Some(&tag), SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn simple_load() {
        let data = "msgid \"foo\"\nmsgstr \"foo2\"\n\nmsgid \"bar\"\nmsgstr \"bar2\"\n";
        let parsed = parse(data, "en-us").unwrap();
        assert_eq!(parsed.tag.canonical(), "en-US");
        assert_eq!(parsed.entries.get("foo").map(String::as_str), Some("foo2"));
        assert_eq!(parsed.entries.get("bar").map(String::as_str), Some("bar2"));
        assert_eq!(parsed.entries.len(), 2);
    }

    #[test]
    fn header_entry_is_skipped() {
        let data = format!("{HEADER}\nmsgid \"foo\"\nmsgstr \"foo2\"\n");
        let parsed = parse(&data, "en-US").unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries.get("foo").map(String::as_str), Some("foo2"));
    }

    #[test]
    fn indented_entries_still_match() {
        let data = "msgid \"foo\"\n\tmsgstr \"foo2\"\n";
        let parsed = parse(data, "en").unwrap();
        assert_eq!(parsed.entries.get("foo").map(String::as_str), Some("foo2"));
    }

    #[test]
    fn missing_tag_hint_is_rejected() {
        let err = PoFormat
            .parse(b"msgid \"a\"\nmsgstr \"b\"\n", None, SystemTime::UNIX_EPOCH)
            .unwrap_err();
        assert!(matches!(err, CatalogError::TagRequired));
    }

    #[test]
    fn zero_matches_is_an_empty_catalog() {
        let parsed = parse("# only a comment\n", "fr").unwrap();
        assert!(parsed.entries.is_empty());
    }
}

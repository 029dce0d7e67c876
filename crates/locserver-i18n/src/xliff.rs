//! XLIFF 2.0 documents
//!
//! A stripped-down view of the XLIFF 2.0 schema: translation units are
//! nested under `file` → `unit` → `segment`, and each segment contributes
//! one (segment id → target text) pair. The language tag is read from the
//! document's `trgLang` attribute; any tag hint is ignored.
//!
//! Unlike the historical loader this one treats XML that fails to parse as
//! an explicit [`CatalogError::Malformed`] instead of an empty catalog; a
//! well-formed document with no units still parses to an empty catalog.

use crate::error::CatalogError;
use crate::format::{MessageFormat, ParsedFile};
use crate::tag::LanguageTag;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Xliff {
    #[serde(rename = "@trgLang", default)]
    trg_lang: String,
    #[serde(default)]
    file: Option<XliffFile>,
}

#[derive(Debug, Default, Deserialize)]
struct XliffFile {
    #[serde(default)]
    unit: Vec<Unit>,
}

#[derive(Debug, Default, Deserialize)]
struct Unit {
    #[serde(default)]
    segment: Vec<Segment>,
}

#[derive(Debug, Default, Deserialize)]
struct Segment {
    #[serde(rename = "@id", default)]
    id: String,
    #[serde(default)]
    target: String,
}

/// Parser for XLIFF 2.0 files. The language tag comes from the document's
/// `trgLang` attribute.
#[derive(Debug, Default)]
pub struct Xliff2Format;

impl MessageFormat for Xliff2Format {
    fn requires_external_tag(&self) -> bool {
        false
    }

    fn parse(
        &self,
        bytes: &[u8],
        _tag_hint: Option<&LanguageTag>,
        modified: SystemTime,
    ) -> Result<ParsedFile, CatalogError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| CatalogError::Malformed(format!("XLIFF file is not UTF-8: {err}")))?;

        let document: Xliff = quick_xml::de::from_str(text)
            .map_err(|err| CatalogError::Malformed(err.to_string()))?;

        let tag = LanguageTag::parse(&document.trg_lang).map_err(|_| {
            CatalogError::Malformed(format!(
                "unparsable trgLang attribute {:?}",
                document.trg_lang
            ))
        })?;

        let mut entries = HashMap::new();
        for unit in document.file.unwrap_or_default().unit {
            for segment in unit.segment {
                debug!(tag = %tag, id = %segment.id, translation = %segment.target, "loading string");
                entries.insert(segment.id, segment.target);
            }
        }

        Ok(ParsedFile { tag, entries, modified })
    }
}

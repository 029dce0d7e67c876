//! The on-disk message format contract and extension dispatch

use crate::error::CatalogError;
use crate::gotext::GoTextJsonFormat;
use crate::po::PoFormat;
use crate::tag::LanguageTag;
use crate::xliff::Xliff2Format;
use std::collections::HashMap;
use std::path::Path;
use std::time::SystemTime;

/// The result of parsing one source file: its resolved language tag and a
/// flat key-to-translation mapping.
#[derive(Debug)]
pub struct ParsedFile {
    /// The language tag the entries belong to
    pub tag: LanguageTag,
    /// Message key to translation
    pub entries: HashMap<String, String>,
    /// Modification time of the source file
    pub modified: SystemTime,
}

/// A parser for one on-disk catalog format.
pub trait MessageFormat: Send + Sync {
    /// Whether the scanner must infer the tag from the directory name before
    /// invoking [`MessageFormat::parse`]. Formats that embed their own tag
    /// ignore the hint.
    fn requires_external_tag(&self) -> bool;

    /// Convert a byte stream into a tag plus flat mapping.
    fn parse(
        &self,
        bytes: &[u8],
        tag_hint: Option<&LanguageTag>,
        modified: SystemTime,
    ) -> Result<ParsedFile, CatalogError>;
}

static GOTEXT: GoTextJsonFormat = GoTextJsonFormat;
static PO: PoFormat = PoFormat;
static XLIFF2: Xliff2Format = Xliff2Format;

/// Pick the parser for a path by file extension.
///
/// Returns `None` for extensions no parser claims; the scanner skips those
/// files.
pub fn format_for_path(path: &Path) -> Option<&'static dyn MessageFormat> {
    let ext = path.extension()?.to_str()?;
    match ext.to_ascii_lowercase().as_str() {
        "json" => Some(&GOTEXT),
        "po" => Some(&PO),
        "xlf" | "xliff" => Some(&XLIFF2),
        _ => None,
    }
}

//! gotext-style JSON message lists
//!
//! The payload embeds its own language tag and an ordered list of
//! `{id, message, translation}` triples:
//!
//! ```json
//! {
//!   "language": "en-US",
//!   "messages": [
//!     {"id": "greeting", "message": "greeting", "translation": "Hello"}
//!   ]
//! }
//! ```

use crate::error::CatalogError;
use crate::format::{MessageFormat, ParsedFile};
use crate::tag::LanguageTag;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::SystemTime;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct LangMessage {
    id: String,
    #[serde(default)]
    #[allow(dead_code)]
    message: String,
    translation: String,
}

#[derive(Debug, Deserialize)]
struct LangMessages {
    language: String,
    #[serde(default)]
    messages: Vec<LangMessage>,
}

/// Parser for gotext-style JSON message files. The language tag comes from
/// the payload's `language` field; any tag hint is ignored.
#[derive(Debug, Default)]
pub struct GoTextJsonFormat;

impl MessageFormat for GoTextJsonFormat {
    fn requires_external_tag(&self) -> bool {
        false
    }

    fn parse(
        &self,
        bytes: &[u8],
        _tag_hint: Option<&LanguageTag>,
        modified: SystemTime,
    ) -> Result<ParsedFile, CatalogError> {
        let payload: LangMessages = serde_json::from_slice(bytes)
            .map_err(|err| CatalogError::Malformed(err.to_string()))?;

        let tag = LanguageTag::parse(&payload.language).map_err(|_| {
            CatalogError::Malformed(format!("unparsable language field {:?}", payload.language))
        })?;

        let mut entries = HashMap::with_capacity(payload.messages.len());
        for message in payload.messages {
            debug!(tag = %tag, id = %message.id, translation = %message.translation, "loading string");
            entries.insert(message.id, message.translation);
        }

        Ok(ParsedFile { tag, entries, modified })
    }
}

//! Canonical BCP-47 language tags

use crate::error::CatalogError;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A canonical BCP-47 language tag (e.g. `en-US`).
///
/// Parsing normalizes subtag casing, so `en-us`, `EN-US`, and `en-US` all
/// produce the same tag. Two tags are equal iff their canonical string forms
/// match. Tags are immutable once parsed.
#[derive(Debug, Clone)]
pub struct LanguageTag {
    id: LanguageIdentifier,
    canonical: String,
}

impl LanguageTag {
    /// Parse and canonicalize a tag string.
    pub fn parse(value: &str) -> Result<Self, CatalogError> {
        let id: LanguageIdentifier = value
            .parse()
            .map_err(|_| CatalogError::InvalidTag(value.to_string()))?;
        let canonical = id.to_string();
        Ok(Self { id, canonical })
    }

    /// The canonical string form, e.g. `en-US`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The primary language subtag, e.g. `en` for `en-US`.
    pub fn primary_language(&self) -> &str {
        self.id.language.as_str()
    }

    /// The region subtag, if present, e.g. `US` for `en-US`.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for LanguageTag {}

impl std::hash::Hash for LanguageTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for LanguageTag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageTag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for LanguageTag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

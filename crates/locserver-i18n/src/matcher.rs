//! Best-fit language tag matching

use crate::tag::LanguageTag;
use tracing::debug;

/// A read-only best-fit resolver over the set of currently loaded tags.
///
/// A matcher is rebuilt from scratch whenever the tag set changes and is
/// never mutated afterwards, so it can be shared freely with concurrent
/// lookups. Resolution is deterministic for a fixed tag set and preference
/// list: tags are held in canonical sort order and scanned in that order.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    tags: Vec<LanguageTag>,
    default: LanguageTag,
}

impl TagMatcher {
    /// Build a matcher over `tags`, defaulting to the first tag in canonical
    /// sort order. Returns `None` for an empty tag set, which has no valid
    /// default.
    pub fn new(mut tags: Vec<LanguageTag>) -> Option<Self> {
        tags.sort();
        tags.dedup();
        let default = tags.first()?.clone();
        Some(Self { tags, default })
    }

    /// Build a matcher with an explicit fallback tag. The fallback is added
    /// to the tag set if not already present.
    pub fn with_default(mut tags: Vec<LanguageTag>, default: LanguageTag) -> Self {
        tags.push(default.clone());
        tags.sort();
        tags.dedup();
        Self { tags, default }
    }

    /// Resolve a prioritized preference list to the best loaded tag.
    ///
    /// For each preference in order: an exact canonical match wins; else any
    /// loaded tag with the same primary language matches, preferring the
    /// bare-language tag over region-qualified ones. Preferences that fail
    /// to parse as tags are treated as non-matches. If nothing matches, the
    /// matcher's default is returned, so resolution never fails.
    pub fn resolve<S: AsRef<str>>(&self, preferences: &[S]) -> &LanguageTag {
        for preference in preferences {
            let Ok(wanted) = LanguageTag::parse(preference.as_ref()) else {
                debug!(preference = preference.as_ref(), "ignoring unparsable preference");
                continue;
            };

            if let Some(tag) = self.tags.iter().find(|tag| **tag == wanted) {
                return tag;
            }

            let mut same_language = None;
            for tag in &self.tags {
                if tag.primary_language() != wanted.primary_language() {
                    continue;
                }
                if tag.region().is_none() {
                    return tag;
                }
                same_language.get_or_insert(tag);
            }
            if let Some(tag) = same_language {
                return tag;
            }
        }

        &self.default
    }

    /// The tag set, in canonical sort order.
    pub fn tags(&self) -> &[LanguageTag] {
        &self.tags
    }

    /// The fallback tag returned when no preference matches.
    pub fn default_tag(&self) -> &LanguageTag {
        &self.default
    }
}

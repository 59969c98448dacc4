use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// Compiled, fully anchored regular expressions keyed by their source
/// pattern. Calling codes frequently share patterns, so matchers decoded
/// from the same artifact share one compiled instance.
pub struct RegexCache {
    cache: DashMap<String, Arc<Regex>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self { cache: DashMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { cache: DashMap::with_capacity(capacity) }
    }

    /// Returns a regex which only matches the whole input against `pattern`.
    pub fn get_anchored_regex(&self, pattern: &str) -> Result<Arc<Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            return Ok(regex.value().clone());
        }
        let entry = self.cache.entry(pattern.to_string()).or_try_insert_with(|| {
            Regex::new(&fast_cat::concat_str!("^(?:", pattern, ")$")).map(Arc::new)
        })?;
        Ok(entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Memoized pattern compilation.
//!
//! A [`PatternCache`] maps pattern source strings to compiled [`Regex`]
//! values. Rule sets are small and bounded, so entries are never evicted.
//! The cache is owned by the caller and passed in explicitly; there is no
//! process-wide instance.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;

use crate::error::{ConfigurationError, Result};
use crate::types::RulePattern;

#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: RwLock<HashMap<String, Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the compiled form of `pattern`, compiling and storing it on
    /// first use. `Regex` clones share their compiled program.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex> {
        if let Some(re) = self.read().get(pattern) {
            return Ok(re.clone());
        }

        let re = compile(pattern)?;
        tracing::debug!(pattern, "compiled normalization pattern");
        let mut map = self.write();
        Ok(map.entry(pattern.to_string()).or_insert(re).clone())
    }

    /// Resolve a rule pattern: compiled patterns pass through untouched,
    /// source patterns go through the cache.
    pub fn resolve(&self, pattern: &RulePattern) -> Result<Regex> {
        match pattern {
            RulePattern::Compiled(re) => Ok(re.clone()),
            RulePattern::Source(src) => self.get_or_compile(src),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Poisoning is ignored: the map only ever holds fully compiled patterns.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Regex>> {
        self.compiled.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Regex>> {
        self.compiled.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Compile a pattern without caching.
pub fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

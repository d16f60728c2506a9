//! Normalizer — maps request paths and status codes to low-cardinality labels.
//!
//! Path normalization is: extract path → first matching rule rewrites it →
//! selected [`PathStrategy`] (passthrough by default).
//!
//! ```
//! use pathnorm_core::{normalize_path, normalize_status_code, RuleSet};
//!
//! let rules = RuleSet::new().with_rule(r"/user/\d+", "/user/:id");
//! assert_eq!(normalize_path("/api/v1/user/1", Some(&rules)).unwrap(), "/api/v1/user/:id");
//! assert_eq!(normalize_status_code(404), "4XX");
//! ```

use regex::Regex;

use crate::cache::{self, PatternCache};
use crate::error::Result;
use crate::source::{extract_path, UrlSource};
use crate::strategy::{Passthrough, PathStrategy};
use crate::template;
use crate::types::{RulePattern, RuleSet, StatusClass};

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Normalize the path of `source` with `rules`, compiling patterns on the
/// spot.
///
/// Without rules (or when none match) the extracted path is returned as-is.
pub fn normalize_path<S>(source: &S, rules: Option<&RuleSet>) -> Result<String>
where
    S: UrlSource + ?Sized,
{
    let path = extract_path(source.raw_url());
    match rules {
        Some(rules) => apply_rules(path, rules, |p| match p {
            RulePattern::Compiled(re) => Ok(re.clone()),
            RulePattern::Source(src) => cache::compile(src),
        }),
        None => Ok(path),
    }
}

/// Like [`normalize_path`], but compiled patterns are looked up in (and
/// added to) `cache`.
pub fn normalize_path_cached<S>(
    source: &S,
    rules: Option<&RuleSet>,
    cache: &PatternCache,
) -> Result<String>
where
    S: UrlSource + ?Sized,
{
    let path = extract_path(source.raw_url());
    match rules {
        Some(rules) => apply_rules(path, rules, |p| cache.resolve(p)),
        None => Ok(path),
    }
}

/// Bucket an HTTP status code into `"2XX"`, `"3XX"`, `"4XX"` or `"5XX"`.
///
/// Everything outside 200–499 is `"5XX"`, see [`StatusClass::from_code`].
pub fn normalize_status_code(status: impl Into<i64>) -> &'static str {
    StatusClass::from_code(status.into()).as_str()
}

/// Evaluate `rules` in order against `path`. The first rule whose pattern
/// matches rewrites its first occurrence and ends evaluation.
///
/// Patterns are resolved lazily, so a bad pattern after the matching rule is
/// never compiled here.
fn apply_rules<F>(path: String, rules: &RuleSet, resolve: F) -> Result<String>
where
    F: Fn(&RulePattern) -> Result<Regex>,
{
    for (index, rule) in rules.iter().enumerate() {
        let re = resolve(&rule.pattern)?;
        tracing::trace!(index, pattern = re.as_str(), %path, "evaluating rule");
        if re.is_match(&path) {
            let replacement = template::translate(&rule.replacement, &re);
            let normalized = re.replace(&path, replacement.as_str()).into_owned();
            tracing::debug!(index, %path, %normalized, "normalization rule matched");
            return Ok(normalized);
        }
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// A rule set, its pattern cache and a post-rule strategy, built once and
/// shared by reference wherever labels are computed.
pub struct Normalizer {
    rules: RuleSet,
    cache: PatternCache,
    strategy: Box<dyn PathStrategy>,
}

impl Normalizer {
    /// Build a normalizer with the passthrough strategy. Every pattern is
    /// compiled up front so bad rules fail here rather than on first request.
    pub fn new(rules: RuleSet) -> Result<Self> {
        Self::with_strategy(rules, Box::new(Passthrough))
    }

    pub fn with_strategy(rules: RuleSet, strategy: Box<dyn PathStrategy>) -> Result<Self> {
        let cache = PatternCache::new();
        for rule in &rules {
            cache.resolve(&rule.pattern)?;
        }
        tracing::debug!(rules = rules.len(), "normalizer ready");
        Ok(Self {
            rules,
            cache,
            strategy,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn normalize_path<S>(&self, source: &S) -> Result<String>
    where
        S: UrlSource + ?Sized,
    {
        let path = normalize_path_cached(source, Some(&self.rules), &self.cache)?;
        Ok(self.strategy.apply(&path))
    }

    pub fn normalize_status_code(&self, status: impl Into<i64>) -> &'static str {
        normalize_status_code(status)
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("rules", &self.rules)
            .field("cached_patterns", &self.cache.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use crate::strategy::{PlaceholderOptions, ValuePlaceholders};
    use pretty_assertions::assert_eq;

    #[test]
    fn user_id_rule() {
        let rules = RuleSet::new().with_rule(r"/user/\d+", "/user/:id");
        assert_eq!(
            normalize_path("/api/v1/user/1", Some(&rules)).unwrap(),
            "/api/v1/user/:id"
        );
    }

    #[test]
    fn no_match_returns_path() {
        let rules = RuleSet::new().with_rule("/x/y", "/z");
        assert_eq!(normalize_path("/no/match", Some(&rules)).unwrap(), "/no/match");
    }

    #[test]
    fn no_rules_strips_query_only() {
        assert_eq!(normalize_path("/user/1?x=y", None).unwrap(), "/user/1");
        assert_eq!(
            normalize_path("/user/1", Some(&RuleSet::new())).unwrap(),
            "/user/1"
        );
    }

    #[test]
    fn first_match_wins() {
        let rules = RuleSet::new()
            .with_rule(r"/user/\d+", "/user/:id")
            .with_rule(r"/user/:id", "/never")
            .with_rule(r"/api", "/never");
        assert_eq!(
            normalize_path("/api/user/5", Some(&rules)).unwrap(),
            "/api/user/:id"
        );
    }

    #[test]
    fn only_first_occurrence_replaced() {
        let rules = RuleSet::new().with_rule(r"\d+", ":n");
        assert_eq!(normalize_path("/a/1/b/2", Some(&rules)).unwrap(), "/a/:n/b/2");
    }

    #[test]
    fn rules_see_path_without_query() {
        let rules = RuleSet::new().with_rule(r"\?.*$", "");
        assert_eq!(normalize_path("/a?b=1", Some(&rules)).unwrap(), "/a");
        let anchored = RuleSet::new().with_rule(r"^/a$", "/matched");
        assert_eq!(normalize_path("/a?b=1", Some(&anchored)).unwrap(), "/matched");
    }

    #[test]
    fn invalid_pattern_before_match_fails() {
        let rules = RuleSet::new()
            .with_rule("/user/(", "/x")
            .with_rule("/user", "/y");
        let err = normalize_path("/user/1", Some(&rules)).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn invalid_pattern_after_match_is_not_reached() {
        let rules = RuleSet::new()
            .with_rule("/user", "/y")
            .with_rule("/user/(", "/x");
        assert_eq!(normalize_path("/user/1", Some(&rules)).unwrap(), "/y/1");
    }

    #[test]
    fn compiled_pattern_used_as_is() {
        let re = Regex::new(r"(?i)/USER/\d+").unwrap();
        let rules = RuleSet::new().with_rule(re, "/user/:id");
        assert_eq!(normalize_path("/user/3", Some(&rules)).unwrap(), "/user/:id");
    }

    #[test]
    fn cached_and_uncached_agree() {
        let rules = RuleSet::new().with_rule(r"/(order)s/\d+", "/$1s/:id");
        let cache = PatternCache::new();
        let a = normalize_path("/orders/77", Some(&rules)).unwrap();
        let b = normalize_path_cached("/orders/77", Some(&rules), &cache).unwrap();
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn normalizer_rejects_bad_rules_up_front() {
        let rules = RuleSet::new().with_rule("/fine", "/ok").with_rule("[", "/bad");
        assert!(Normalizer::new(rules).is_err());
    }

    #[test]
    fn normalizer_applies_strategy_after_rules() {
        let rules = RuleSet::new().with_rule(r"^/v\d+", "/api");
        let strategy = ValuePlaceholders::new(&PlaceholderOptions::default()).unwrap();
        let normalizer = Normalizer::with_strategy(rules, Box::new(strategy)).unwrap();
        assert_eq!(
            normalizer.normalize_path("/v2/items/123?full=1").unwrap(),
            "/api/items/#val"
        );
        assert_eq!(normalizer.normalize_status_code(302u16), "3XX");
    }

    #[test]
    fn normalizer_defaults_to_passthrough() {
        let normalizer = Normalizer::new(RuleSet::new()).unwrap();
        assert_eq!(normalizer.normalize_path("/user/42").unwrap(), "/user/42");
    }

    #[test]
    fn status_buckets() {
        assert_eq!(normalize_status_code(200), "2XX");
        assert_eq!(normalize_status_code(301), "3XX");
        assert_eq!(normalize_status_code(404), "4XX");
        assert_eq!(normalize_status_code(503), "5XX");
        assert_eq!(normalize_status_code(100), "5XX");
        assert_eq!(normalize_status_code(600), "5XX");
    }
}

//! Core types for pathnorm-core.
//!
//! This module defines the rule model consumed by the path normalizer
//! ([`NormalizationRule`], [`RulePattern`], [`RuleSet`]) and the
//! [`StatusClass`] buckets produced by the status-code normalizer.

use regex::Regex;

use crate::error::{ConfigurationError, Result};

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// The match half of a rule.
///
/// A `Source` pattern is compiled when the rule is evaluated (through a
/// [`PatternCache`](crate::cache::PatternCache) when one is supplied). A
/// `Compiled` pattern is used as-is.
#[derive(Debug, Clone)]
pub enum RulePattern {
    Source(String),
    Compiled(Regex),
}

impl RulePattern {
    /// The pattern text, whichever form it is held in.
    pub fn as_str(&self) -> &str {
        match self {
            RulePattern::Source(s) => s,
            RulePattern::Compiled(re) => re.as_str(),
        }
    }
}

impl From<&str> for RulePattern {
    fn from(s: &str) -> Self {
        RulePattern::Source(s.to_string())
    }
}

impl From<String> for RulePattern {
    fn from(s: String) -> Self {
        RulePattern::Source(s)
    }
}

impl From<Regex> for RulePattern {
    fn from(re: Regex) -> Self {
        RulePattern::Compiled(re)
    }
}

/// A `(pattern, replacement)` pair.
///
/// `replacement` is a template: `$1`, `$&`, `$<name>` and `${name}` refer to
/// capture groups of `pattern` (see [`template`](crate::template)).
#[derive(Debug, Clone)]
pub struct NormalizationRule {
    pub pattern: RulePattern,
    pub replacement: String,
}

impl NormalizationRule {
    pub fn new(pattern: impl Into<RulePattern>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// An ordered list of rules. Evaluation is first-match-wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<NormalizationRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; it is evaluated after every rule already present.
    pub fn push(&mut self, rule: NormalizationRule) {
        self.rules.push(rule);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with_rule(
        mut self,
        pattern: impl Into<RulePattern>,
        replacement: impl Into<String>,
    ) -> Self {
        self.push(NormalizationRule::new(pattern, replacement));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizationRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build a rule set from untyped `[pattern, replacement]` pairs, as read
    /// from a config file or command line.
    ///
    /// Fails with [`ConfigurationError::MalformedRule`] on the first pair that
    /// does not have exactly two elements.
    pub fn from_pairs<I, P, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut set = RuleSet::new();
        for (index, pair) in pairs.into_iter().enumerate() {
            match pair.as_ref() {
                [pattern, replacement] => {
                    let pattern: &str = pattern.as_ref();
                    let replacement: &str = replacement.as_ref();
                    set.push(NormalizationRule::new(pattern, replacement));
                }
                other => {
                    return Err(ConfigurationError::MalformedRule {
                        index,
                        arity: other.len(),
                    })
                }
            }
        }
        Ok(set)
    }

    /// Build a rule set from a JSON value such as
    /// `[["/user/\\d+", "/user/:id"]]`.
    ///
    /// A value that is not an array at all means "no rules" and yields an
    /// empty set. Inside the array every entry must be a two-element array of
    /// strings.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let Some(entries) = value.as_array() else {
            return Ok(RuleSet::new());
        };

        let mut set = RuleSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let tuple = entry
                .as_array()
                .ok_or(ConfigurationError::NotAPair { index })?;
            let [pattern, replacement] = tuple.as_slice() else {
                return Err(ConfigurationError::MalformedRule {
                    index,
                    arity: tuple.len(),
                });
            };
            match (pattern.as_str(), replacement.as_str()) {
                (Some(p), Some(r)) => set.push(NormalizationRule::new(p, r)),
                _ => return Err(ConfigurationError::NonStringElement { index }),
            }
        }
        Ok(set)
    }
}

impl FromIterator<NormalizationRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = NormalizationRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a NormalizationRule;
    type IntoIter = std::slice::Iter<'a, NormalizationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

// ---------------------------------------------------------------------------
// Status classes
// ---------------------------------------------------------------------------

/// The four status-code buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusClass {
    TwoXx,
    ThreeXx,
    FourXx,
    FiveXx,
}

impl StatusClass {
    /// Bucket a status code.
    ///
    /// Anything outside 200–499 lands in [`StatusClass::FiveXx`], including
    /// informational codes (1xx) and out-of-range values such as 600. Existing
    /// dashboards depend on that catch-all, so it is kept as-is.
    pub fn from_code(status: i64) -> Self {
        match status {
            200..=299 => StatusClass::TwoXx,
            300..=399 => StatusClass::ThreeXx,
            400..=499 => StatusClass::FourXx,
            _ => StatusClass::FiveXx,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::TwoXx => "2XX",
            StatusClass::ThreeXx => "3XX",
            StatusClass::FourXx => "4XX",
            StatusClass::FiveXx => "5XX",
        }
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

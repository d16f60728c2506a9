//! The single error type raised by pathnorm-core.
//!
//! Every failure in this crate is a misconfiguration: a rule with the wrong
//! shape, a pattern that does not compile, or a config file that cannot be
//! read. Nothing here is retried; callers are expected to fail fast at
//! startup instead of emitting mislabelled metrics.

use thiserror::Error;

/// Result alias used throughout pathnorm-core.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("bad rule at index {index}: expected [pattern, replacement], got {arity} element(s)")]
    MalformedRule { index: usize, arity: usize },

    #[error("bad rule at index {index}: expected a [pattern, replacement] array")]
    NotAPair { index: usize },

    #[error("bad rule at index {index}: pattern and replacement must both be strings")]
    NonStringElement { index: usize },

    #[error("invalid rule pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid placeholder mask {mask:?}: {source}")]
    InvalidMask {
        mask: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to load normalizer config: {0}")]
    Load(#[from] config::ConfigError),
}

impl ConfigurationError {
    /// Index of the offending rule, if the error is tied to one.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            ConfigurationError::MalformedRule { index, .. }
            | ConfigurationError::NotAPair { index }
            | ConfigurationError::NonStringElement { index } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_rule_message_names_index_and_arity() {
        let err = ConfigurationError::MalformedRule { index: 2, arity: 1 };
        assert_eq!(
            err.to_string(),
            "bad rule at index 2: expected [pattern, replacement], got 1 element(s)"
        );
        assert_eq!(err.rule_index(), Some(2));
    }

    #[test]
    fn pattern_error_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigurationError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.rule_index(), None);
    }
}

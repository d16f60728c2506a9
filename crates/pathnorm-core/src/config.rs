//! Configuration types for pathnorm.
//!
//! [`NormalizerConfig::load`] layers a user TOML file over the built-in
//! defaults. [`NormalizerConfig::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests). Rules are kept as untyped pairs
//! here; [`NormalizerConfig::build`] is where malformed ones are rejected.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::strategy::{PlaceholderOptions, StrategyKind};
use crate::types::RuleSet;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r##"
[path]
strategy = "passthrough"
rules    = []

[path.placeholders]
replacement       = "#val"
min_hex_length    = 7
min_base64_length = 68
extra_masks       = []
"##;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level normalizer configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub path: PathConfig,
}

/// `[path]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Ordered `[pattern, replacement]` pairs.
    #[serde(default)]
    pub rules: Vec<Vec<String>>,
    #[serde(default)]
    pub placeholders: PlaceholderOptions,
}

impl NormalizerConfig {
    /// Load `path`, layered on top of the built-in defaults. The file must
    /// exist; its format is taken from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?)
    }

    /// Parse TOML text, layered on top of the built-in defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The configured rules, validated for arity.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::from_pairs(&self.path.rules)
    }

    /// Build a ready-to-use [`Normalizer`].
    pub fn build(&self) -> Result<Normalizer> {
        let rules = self.rule_set()?;
        let strategy = self.path.strategy.build(&self.path.placeholders)?;
        Normalizer::with_strategy(rules, strategy)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

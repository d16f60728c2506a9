//! Post-rule path strategies.
//!
//! A [`PathStrategy`] runs on the output of rule evaluation. The default,
//! [`Passthrough`], leaves the path alone: placeholder substitution only
//! happens when a caller selects [`ValuePlaceholders`] explicitly, either in
//! code or through [`StrategyKind`] in the config file.

use regex::Regex;
use serde::Deserialize;

use crate::error::{ConfigurationError, Result};

/// Matches a canonical hyphenated UUID.
pub const UUID_REGEX: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

const DECIMAL_REGEX: &str = r"^-?\d+$";
const DATE_REGEX: &str = r"^(\d{2}|\d{4})-\d{2}-\d{2}$";
const HEX_REGEX: &str = r"^[0-9a-fA-F]+$";
const BASE64_REGEX: &str = r"^[0-9A-Za-z+/_-]+={0,2}$";

/// Interface for rewriting a path after rules have been applied.
pub trait PathStrategy: Send + Sync {
    fn apply(&self, path: &str) -> String;
}

/// Strategy selector, as written in config (`strategy = "value_placeholders"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Passthrough,
    ValuePlaceholders,
}

impl StrategyKind {
    /// Instantiate the selected strategy.
    pub fn build(self, options: &PlaceholderOptions) -> Result<Box<dyn PathStrategy>> {
        Ok(match self {
            StrategyKind::Passthrough => Box::new(Passthrough),
            StrategyKind::ValuePlaceholders => Box::new(ValuePlaceholders::new(options)?),
        })
    }
}

/// Returns the path unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl PathStrategy for Passthrough {
    fn apply(&self, path: &str) -> String {
        path.to_string()
    }
}

/// `[path.placeholders]` section of the config.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderOptions {
    #[serde(default = "default_replacement")]
    pub replacement: String,
    #[serde(default = "default_min_hex_length")]
    pub min_hex_length: usize,
    #[serde(default = "default_min_base64_length")]
    pub min_base64_length: usize,
    #[serde(default)]
    pub extra_masks: Vec<String>,
}

fn default_replacement() -> String { "#val".to_string() }
fn default_min_hex_length() -> usize { 7 }
fn default_min_base64_length() -> usize { 68 }

impl Default for PlaceholderOptions {
    fn default() -> Self {
        Self {
            replacement: default_replacement(),
            min_hex_length: default_min_hex_length(),
            min_base64_length: default_min_base64_length(),
            extra_masks: Vec::new(),
        }
    }
}

/// Replaces path segments that look like values (ids, UUIDs, dates, hashes,
/// tokens) with a fixed placeholder.
///
/// ```
/// use pathnorm_core::strategy::{PathStrategy, PlaceholderOptions, ValuePlaceholders};
///
/// let strategy = ValuePlaceholders::new(&PlaceholderOptions::default()).unwrap();
/// assert_eq!(strategy.apply("/api/v1/user/42"), "/api/v1/user/#val");
/// ```
#[derive(Debug, Clone)]
pub struct ValuePlaceholders {
    replacement: String,
    min_hex_length: usize,
    min_base64_length: usize,
    decimal: Regex,
    uuid: Regex,
    date: Regex,
    hex: Regex,
    base64: Regex,
    extra: Vec<Regex>,
}

impl ValuePlaceholders {
    pub fn new(options: &PlaceholderOptions) -> Result<Self> {
        let extra = options
            .extra_masks
            .iter()
            .map(|mask| {
                Regex::new(mask).map_err(|source| ConfigurationError::InvalidMask {
                    mask: mask.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            replacement: options.replacement.clone(),
            min_hex_length: options.min_hex_length,
            min_base64_length: options.min_base64_length,
            decimal: builtin(DECIMAL_REGEX)?,
            uuid: builtin(UUID_REGEX)?,
            date: builtin(DATE_REGEX)?,
            hex: builtin(HEX_REGEX)?,
            base64: builtin(BASE64_REGEX)?,
            extra,
        })
    }

    /// Whether a single path segment should be replaced.
    pub fn is_value(&self, segment: &str) -> bool {
        if segment.is_empty() {
            return false;
        }
        self.decimal.is_match(segment)
            || self.uuid.is_match(segment)
            || self.date.is_match(segment)
            || (segment.len() >= self.min_hex_length
                && segment.bytes().any(|b| b.is_ascii_digit())
                && self.hex.is_match(segment))
            || (segment.len() >= self.min_base64_length && self.base64.is_match(segment))
            || self.extra.iter().any(|re| re.is_match(segment))
    }
}

impl PathStrategy for ValuePlaceholders {
    fn apply(&self, path: &str) -> String {
        path.split('/')
            .map(|segment| {
                if self.is_value(segment) {
                    self.replacement.as_str()
                } else {
                    segment
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn builtin(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ConfigurationError::InvalidMask {
        mask: pattern.to_string(),
        source,
    })
}

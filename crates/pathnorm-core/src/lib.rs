//! pathnorm-core — request path and status-code normalization.
//!
//! Turns raw request URLs and HTTP status codes into low-cardinality labels
//! for metrics aggregation:
//!
//! ```text
//! raw URL ──► extract path ──► rules (first match wins) ──► strategy ──► label
//! status  ──► 2XX | 3XX | 4XX | 5XX
//! ```
//!
//! Everything here is synchronous and free of I/O on the normalization path.
//! Reusable state (a [`PatternCache`], a [`Normalizer`]) is always owned by
//! the caller.

pub mod cache;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod source;
pub mod strategy;
pub mod template;
pub mod types;

pub use cache::PatternCache;
pub use error::{ConfigurationError, Result};
pub use normalizer::{normalize_path, normalize_path_cached, normalize_status_code, Normalizer};
pub use source::{RequestInfo, UrlSource};
pub use types::{NormalizationRule, RulePattern, RuleSet, StatusClass};

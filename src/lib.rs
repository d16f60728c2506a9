//! pathnorm — request path and status-code labels for metrics.
//!
//! This crate re-exports [`pathnorm_core`] so integration tests and embedding
//! applications can depend on a single crate, and hosts the `pathnorm` CLI.
//!
//! # Flow
//!
//! ```text
//! raw URL ──► extract path ──► rules ──► strategy ──► path label
//! status  ──► StatusClass ──► "2XX" | "3XX" | "4XX" | "5XX"
//! ```

pub mod cli;

pub use pathnorm_core::*;

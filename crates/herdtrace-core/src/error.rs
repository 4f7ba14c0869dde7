//! Typed errors surfaced by the pipeline.
//!
//! Library entry points return `anyhow::Result` with path context; the
//! errors below sit at the root of those chains and can be recovered with
//! `err.downcast_ref::<RecordError>()`.

use thiserror::Error;

/// A raw trace line that does not match the declared field layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line has fewer fields than the layout needs.
    #[error("line {line}: missing field {index} (line has {found} fields)")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// 0-based field index that was requested.
        index: usize,
        /// Number of whitespace-separated fields present.
        found: usize,
    },
    /// The field exists but is not a finite number.
    #[error("line {line}: field {index} is not a finite number: {value:?}")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// 0-based field index.
        index: usize,
        /// Offending text.
        value: String,
    },
}

/// Synthesis cannot start from the extracted distributions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthError {
    /// A distribution to resample from is empty.
    #[error("empty {what} distribution: need at least {needed} well-formed samples")]
    EmptyDistribution {
        /// `"distance"` or `"turn"`.
        what: &'static str,
        /// Minimum number of samples required.
        needed: usize,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

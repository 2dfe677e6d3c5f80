//! Error types for chainlab.
//!
//! The digest function and the chain recompute path are total and never
//! fail; a broken chain is reported as data, not as an error. [`LabError`]
//! covers the few operations around them that take untrusted input.

use thiserror::Error;

/// Errors returned by fallible chainlab operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabError {
    /// A record index past the end of the chain.
    #[error("record {index} out of range (chain has {len} records)")]
    RecordOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of records in the chain.
        len: usize,
    },

    /// Text that does not parse as a 64-character hex digest.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// A mining prefix that no digest could ever start with.
    #[error("invalid difficulty: {0}")]
    InvalidDifficulty(String),

    /// Any other unusable configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

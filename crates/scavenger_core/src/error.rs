//! # Memory Errors
//!
//! All errors that can surface from the pools and containers. Every
//! failure is reported synchronously at the call site before any shared
//! storage is mutated; nothing is retried internally.

use thiserror::Error;

/// Errors that can occur in the resource-reuse layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// A requested or derived size exceeds a configured hard ceiling.
    /// The pool or buffer is left unmodified.
    #[error("capacity exceeded: requested {requested}, maximum {max}")]
    CapacityExceeded {
        /// The size that was requested or derived.
        requested: usize,
        /// The configured ceiling.
        max: usize,
    },

    /// A resize would silently drop live bytes. Callers that want to
    /// truncate must shrink the length first.
    #[error("resize to {requested} would drop live data ({in_use} bytes in use); use set_len first")]
    DataLoss {
        /// The capacity that was requested.
        requested: usize,
        /// Bytes currently in use.
        in_use: usize,
    },

    /// A destination buffer is too small for the requested copy. Rejected
    /// before any partial copy happens.
    #[error("buffer too small: needed {needed}, available {available}")]
    BufferTooSmall {
        /// Bytes the copy would touch.
        needed: usize,
        /// Bytes the buffer actually has.
        available: usize,
    },

    /// Index or length arguments fall outside the valid bounds of a
    /// sequence operation.
    #[error("out of range: index {index}, count {count}, length {len}")]
    OutOfRange {
        /// The starting index that was given.
        index: usize,
        /// The element count that was given.
        count: usize,
        /// The live length of the sequence.
        len: usize,
    },

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pool and container operations.
pub type MemoryResult<T> = Result<T, MemoryError>;

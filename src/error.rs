//! Error types for u-aco.
//!
//! Numerical corner cases inside an iteration (zero-weight transition
//! rows, zero-cost routes) are recovered locally and never surface here.
//! Only illegal construction input and driver misuse are reported.

use thiserror::Error;

/// Unified error type for colony construction and driving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcoError {
    /// The distance matrix covers fewer than two nodes.
    #[error("distance matrix must cover at least 2 nodes, got {0}")]
    TooFewNodes(usize),

    /// Matrix data does not form a square `size x size` grid.
    #[error("matrix data of length {len} does not form a {size}x{size} grid")]
    ShapeMismatch {
        /// Expected side length.
        size: usize,
        /// Actual number of cells supplied.
        len: usize,
    },

    /// A distance entry is negative, NaN or infinite.
    #[error("distance from node {from} to node {to} must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// Row of the offending entry.
        from: usize,
        /// Column of the offending entry.
        to: usize,
        /// The rejected value.
        value: f64,
    },

    /// A hyperparameter would produce a meaningless run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A driver command needs a colony, but none has been loaded.
    #[error("no colony loaded")]
    NotInitialized,

    /// A driver command conflicts with the run in progress.
    #[error("a run is already in progress")]
    AlreadyRunning,

    /// The driver worker thread has exited.
    #[error("driver worker is no longer running")]
    Disconnected,
}

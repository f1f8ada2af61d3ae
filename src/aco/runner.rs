//! One-shot batch execution.

use super::colony::{AcoResult, AntColony};
use super::config::AcoConfig;
use crate::distance::DistanceMatrix;
use crate::error::AcoError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Builds a colony and runs it to completion.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner};
/// use u_aco::distance::{random_points, DistanceMatrix};
///
/// let dm = DistanceMatrix::from_points(&random_points(12, 42, 100.0));
/// let config = AcoConfig::default()
///     .with_n_ants(20)
///     .with_n_best(5)
///     .with_n_iterations(50)
///     .with_seed(42);
///
/// let result = AcoRunner::run(dm, &config).unwrap();
/// assert_eq!(result.iterations, 50);
/// assert_eq!(result.best_route.unwrap().len(), 12);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs the colony for `config.n_iterations` iterations.
    pub fn run(distances: DistanceMatrix, config: &AcoConfig) -> Result<AcoResult, AcoError> {
        Self::run_with_cancel(distances, config, None)
    }

    /// Runs with an optional cancellation token, checked between
    /// iterations.
    pub fn run_with_cancel(
        distances: DistanceMatrix,
        config: &AcoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult, AcoError> {
        let mut colony = AntColony::new(distances, config.clone())?;
        Ok(colony.run_with_cancel(false, cancel))
    }
}

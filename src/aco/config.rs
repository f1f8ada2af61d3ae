//! Colony configuration.

use crate::error::AcoError;

/// Hyperparameters for an [`AntColony`](super::AntColony).
///
/// Only settings that would yield a meaningless run are rejected by
/// [`validate`](Self::validate). The remaining ranges are preconditions the
/// caller is trusted with, so interactive tools can explore freely:
///
/// - `decay` in (0, 1)
/// - `alpha`, `beta` >= 0
/// - `q` > 0
///
/// # Examples
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_n_ants(20)
///     .with_n_best(5)
///     .with_n_iterations(200)
///     .with_decay(0.3)
///     .with_beta(3.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.n_ants, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Ants (constructed routes) per iteration.
    pub n_ants: usize,

    /// Lowest-cost routes per iteration that deposit pheromone.
    ///
    /// Values above `n_ants` mean every ant deposits.
    pub n_best: usize,

    /// Iterations executed by [`run`](super::AntColony::run).
    pub n_iterations: usize,

    /// Evaporation rate ρ applied once per iteration: `τ ← (1 - ρ)·τ`.
    pub decay: f64,

    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Heuristic (inverse distance) influence exponent.
    pub beta: f64,

    /// Deposit scale: each elite route adds `q / cost` to its edges.
    pub q: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed at construction.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 10,
            n_best: 3,
            n_iterations: 100,
            decay: 0.5,
            alpha: 1.0,
            beta: 2.0,
            q: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    pub fn with_n_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    pub fn with_n_best(mut self, n: usize) -> Self {
        self.n_best = n;
        self
    }

    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AcoError> {
        if self.n_ants == 0 {
            return Err(AcoError::InvalidConfig("n_ants must be positive".into()));
        }
        if self.n_iterations == 0 {
            return Err(AcoError::InvalidConfig(
                "n_iterations must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.n_ants, 10);
        assert_eq!(config.n_best, 3);
        assert_eq!(config.n_iterations, 100);
        assert!((config.decay - 0.5).abs() < 1e-12);
        assert!((config.alpha - 1.0).abs() < 1e-12);
        assert!((config.beta - 2.0).abs() < 1e-12);
        assert!((config.q - 1.0).abs() < 1e-12);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        let config = AcoConfig::default().with_n_ants(0);
        assert!(matches!(config.validate(), Err(AcoError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AcoConfig::default().with_n_iterations(0);
        assert!(matches!(config.validate(), Err(AcoError::InvalidConfig(_))));
    }

    #[test]
    fn test_permissive_ranges() {
        // Out-of-range exponents and elite counts are the caller's business.
        let config = AcoConfig::default()
            .with_n_best(50)
            .with_alpha(0.0)
            .with_beta(0.0)
            .with_decay(0.0);
        assert!(config.validate().is_ok());
    }
}

//! The steppable colony engine.
//!
//! [`AntColony`] owns the pheromone matrix and best-so-far tracking. Each
//! [`step`](AntColony::step) is one full iteration:
//! construct → evaporate → deposit → update best.

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use super::types::{AcoState, Phase, Route, Solution};
use crate::distance::DistanceMatrix;
use crate::error::AcoError;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Keeps `q / cost` finite for zero-cost routes over coincident nodes.
const DEPOSIT_EPSILON: f64 = 1e-10;

/// Result of a complete [`AntColony::run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Best route found; `None` only if cancelled before the first iteration.
    pub best_route: Option<Route>,

    /// Cost of `best_route`, `f64::INFINITY` when there is none.
    pub best_distance: f64,

    /// Iterations actually executed.
    pub iterations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best distance after each executed iteration.
    pub distance_history: Vec<f64>,
}

/// Ant Colony Optimization engine for the TSP.
///
/// Drive it one iteration at a time with [`step`](Self::step), or to
/// completion with [`run`](Self::run); both follow exactly the same path,
/// so a seeded `run` matches a reset followed by `n_iterations` steps.
///
/// The random source is injectable: [`new`](Self::new) seeds a [`StdRng`]
/// from the config, [`with_rng`](Self::with_rng) takes any generator.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, AntColony};
/// use u_aco::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let config = AcoConfig::default().with_n_iterations(20).with_seed(7);
/// let mut colony = AntColony::new(dm, config).unwrap();
///
/// let (iteration, best) = colony.step();
/// assert_eq!(iteration, 1);
/// assert!(best.is_finite());
///
/// let result = colony.run(false);
/// assert_eq!(result.iterations, 20);
/// assert!((result.best_distance - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct AntColony<R = StdRng> {
    distances: DistanceMatrix,
    config: AcoConfig,
    pheromone: PheromoneMatrix,
    iteration: usize,
    best_route: Option<Route>,
    best_distance: f64,
    last_solutions: Vec<Solution>,
    rng: R,
}

impl AntColony<StdRng> {
    /// Creates a colony seeded from `config.seed`, or from a random seed.
    pub fn new(distances: DistanceMatrix, config: AcoConfig) -> Result<Self, AcoError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(distances, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AntColony<R> {
    /// Creates a colony drawing all randomness from `rng`.
    pub fn with_rng(
        distances: DistanceMatrix,
        config: AcoConfig,
        rng: R,
    ) -> Result<Self, AcoError> {
        let n = distances.size();
        if n < 2 {
            return Err(AcoError::TooFewNodes(n));
        }
        if let Some((from, to, value)) = distances.find_invalid() {
            return Err(AcoError::InvalidDistance { from, to, value });
        }
        config.validate()?;

        Ok(Self {
            pheromone: PheromoneMatrix::uniform(n),
            distances,
            config,
            iteration: 0,
            best_route: None,
            best_distance: f64::INFINITY,
            last_solutions: Vec::new(),
            rng,
        })
    }

    /// Restores uniform pheromone and clears all progress.
    ///
    /// The random source is not rewound.
    pub fn reset(&mut self) {
        self.pheromone = PheromoneMatrix::uniform(self.distances.size());
        self.iteration = 0;
        self.best_route = None;
        self.best_distance = f64::INFINITY;
        self.last_solutions.clear();
    }

    /// Probability of moving from `current` to each node.
    ///
    /// `visited[j]` marks nodes already on the route; they get probability
    /// zero. Unvisited nodes are weighted `τ(current, j)^α · η(current, j)^β`
    /// with `η = 1 / d` for positive distances and `0` otherwise. When every
    /// weight is zero the vector is all zeros, and the caller picks
    /// uniformly among unvisited nodes instead.
    ///
    /// Nodes past the end of a short `visited` slice count as unvisited.
    pub fn transition_probabilities(&self, current: usize, visited: &[bool]) -> Vec<f64> {
        let mut weights: Vec<f64> = (0..self.distances.size())
            .map(|j| {
                if visited.get(j).copied().unwrap_or(false) {
                    return 0.0;
                }
                let d = self.distances.get(current, j);
                let eta = if d > 0.0 { 1.0 / d } else { 0.0 };
                self.pheromone.get(current, j).powf(self.config.alpha) * eta.powf(self.config.beta)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            for w in &mut weights {
                *w /= total;
            }
        }
        weights
    }

    /// Builds one ant's route from a uniformly random start node.
    pub fn construct_route(&mut self) -> Route {
        let n = self.distances.size();
        let start = self.rng.random_range(0..n);

        let mut route = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        route.push(start);
        visited[start] = true;

        while route.len() < n {
            let current = route[route.len() - 1];
            let candidates: Vec<usize> = (0..n).filter(|&j| !visited[j]).collect();
            if candidates.is_empty() {
                break;
            }

            let probs = self.transition_probabilities(current, &visited);
            let next = match roulette(&probs, &mut self.rng) {
                Some(j) => j,
                None => {
                    trace!("zero transition weights from node {current}, choosing uniformly");
                    candidates[self.rng.random_range(0..candidates.len())]
                }
            };

            route.push(next);
            visited[next] = true;
        }
        route
    }

    /// Runs one iteration and returns `(iteration, best_distance)`.
    ///
    /// All state is updated before this returns. Stepping past
    /// `n_iterations` is allowed; callers bound their own loops.
    pub fn step(&mut self) -> (usize, f64) {
        let solutions: Vec<Solution> = (0..self.config.n_ants)
            .map(|_| {
                let route = self.construct_route();
                let cost = self.distances.route_length(&route);
                Solution { route, cost }
            })
            .collect();

        self.pheromone.evaporate(self.config.decay);

        // Stable sort: equal costs keep construction order.
        let mut ranked: Vec<&Solution> = solutions.iter().collect();
        ranked.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(CmpOrdering::Equal));
        for elite in ranked.iter().take(self.config.n_best) {
            let amount = self.config.q / (elite.cost + DEPOSIT_EPSILON);
            self.pheromone.deposit(&elite.route, amount);
        }

        // min_by keeps the first of equal minima, i.e. the earliest ant.
        let iteration_best = solutions
            .iter()
            .min_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(CmpOrdering::Equal));
        if let Some(best) = iteration_best {
            if best.cost < self.best_distance {
                self.best_distance = best.cost;
                self.best_route = Some(best.route.clone());
            }
        }

        self.iteration += 1;
        self.last_solutions = solutions;
        debug!("{}", self.progress_line());

        (self.iteration, self.best_distance)
    }

    /// Resets, then steps `n_iterations` times.
    ///
    /// With `verbose`, progress is logged at `info` every tenth of the run.
    pub fn run(&mut self, verbose: bool) -> AcoResult {
        self.run_with_cancel(verbose, None)
    }

    /// Runs like [`run`](Self::run), checking `cancel` before each
    /// iteration.
    ///
    /// A cancelled run returns the best found so far; no iteration is
    /// ever left half-applied.
    pub fn run_with_cancel(&mut self, verbose: bool, cancel: Option<Arc<AtomicBool>>) -> AcoResult {
        self.reset();

        let total = self.config.n_iterations;
        let log_every = (total / 10).max(1);
        let mut distance_history = Vec::with_capacity(total);
        let mut cancelled = false;

        for i in 0..total {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let (_, best) = self.step();
            distance_history.push(best);

            if verbose && i % log_every == 0 {
                info!("Iter {}/{}: best distance {:.4}", i + 1, total, best);
            }
        }

        AcoResult {
            best_route: self.best_route.clone(),
            best_distance: self.best_distance,
            iterations: distance_history.len(),
            cancelled,
            distance_history,
        }
    }
}

impl<R> AntColony<R> {
    /// Iterations completed since the last reset.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Best route found since the last reset.
    pub fn best_route(&self) -> Option<&[usize]> {
        self.best_route.as_deref()
    }

    /// Cost of the best route, `f64::INFINITY` until one exists.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// Routes built in the latest iteration, in construction order.
    pub fn last_solutions(&self) -> &[Solution] {
        &self.last_solutions
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// [`Phase::Exhausted`] once the iteration budget is used up,
    /// [`Phase::Ready`] otherwise.
    pub fn phase(&self) -> Phase {
        if self.iteration >= self.config.n_iterations {
            Phase::Exhausted
        } else {
            Phase::Ready
        }
    }

    /// Copy of the current pheromone matrix.
    pub fn pheromone_matrix(&self) -> PheromoneMatrix {
        self.pheromone.clone()
    }

    /// Copy of all observable state.
    pub fn state(&self) -> AcoState {
        AcoState {
            iteration: self.iteration,
            best_route: self.best_route.clone(),
            best_distance: self.best_distance.is_finite().then_some(self.best_distance),
            pheromone: self.pheromone.clone(),
            last_solutions: self.last_solutions.clone(),
        }
    }

    /// One-line progress summary, e.g. `"Iter 12: 431.0571"` or
    /// `"Iter 0: -"` before any route exists.
    pub fn progress_line(&self) -> String {
        if self.best_distance.is_finite() {
            format!("Iter {}: {:.4}", self.iteration, self.best_distance)
        } else {
            format!("Iter {}: -", self.iteration)
        }
    }
}

/// Roulette-wheel draw over a normalized probability vector.
///
/// Returns `None` when no entry is positive.
fn roulette<R: Rng>(probs: &[f64], rng: &mut R) -> Option<usize> {
    let last_positive = probs.iter().rposition(|&p| p > 0.0)?;

    let threshold: f64 = rng.random();
    let mut cumulative = 0.0;
    for (j, &p) in probs.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        cumulative += p;
        if cumulative > threshold {
            return Some(j);
        }
    }

    Some(last_positive) // floating-point fallback
}

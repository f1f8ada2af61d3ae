//! Value types shared by the colony, runner and driver.

use super::pheromone::PheromoneMatrix;

/// A closed tour: each node index `0..n` exactly once, implicitly
/// returning from the last node to the first.
pub type Route = Vec<usize>;

/// One ant's route and its closed-tour cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub route: Route,
    pub cost: f64,
}

/// Lifecycle of a colony as seen by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No colony has been loaded.
    Uninitialized,
    /// Fewer than `n_iterations` iterations have run since the last reset.
    Ready,
    /// A driver is actively iterating.
    Stepping,
    /// The iteration budget is used up. Further steps are still allowed.
    Exhausted,
}

/// A detached copy of a colony's observable state.
///
/// Holding one never blocks or races the colony it was taken from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoState {
    /// Iterations completed since the last reset.
    pub iteration: usize,

    /// Best route found so far.
    pub best_route: Option<Route>,

    /// Cost of `best_route`; `None` until a route exists.
    pub best_distance: Option<f64>,

    /// Pheromone trails after the latest iteration.
    pub pheromone: PheromoneMatrix,

    /// Routes built in the latest iteration, in construction order.
    pub last_solutions: Vec<Solution>,
}

/// Renders a route as `"0 -> 4 -> 2"`.
///
/// # Examples
///
/// ```
/// use u_aco::aco::format_route;
///
/// assert_eq!(format_route(&[3, 0, 1]), "3 -> 0 -> 1");
/// assert_eq!(format_route(&[]), "");
/// ```
pub fn format_route(route: &[usize]) -> String {
    route
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

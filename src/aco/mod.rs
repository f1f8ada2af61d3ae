//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Ants build closed tours one node at a time, choosing each next node by
//! roulette wheel over `τ^α · η^β`, where `τ` is the learned pheromone
//! trail and `η = 1/d` the inverse edge distance. After every iteration
//! all trails evaporate by a factor `1 - ρ`, and the `n_best` cheapest
//! tours of that iteration deposit `Q / L` on each edge they use.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Hyperparameters and seed
//! - [`AntColony`]: The steppable engine (`step`, `run`, `reset`, snapshots)
//! - [`AcoRunner`]: One-shot batch execution returning an [`AcoResult`]
//! - [`ColonyDriver`]: Worker-thread driver with pause/resume/cancel
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod colony;
mod config;
mod driver;
mod pheromone;
mod runner;
mod types;

pub use colony::{AcoResult, AntColony};
pub use config::AcoConfig;
pub use driver::{ColonyDriver, DriverEvent, Snapshot};
pub use pheromone::PheromoneMatrix;
pub use runner::AcoRunner;
pub use types::{format_route, AcoState, Phase, Route, Solution};

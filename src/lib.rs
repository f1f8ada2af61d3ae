//! Steppable Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! - **Distance**: Dense distance matrices from planar (Euclidean) or
//!   geographic (Haversine) coordinates, plus seeded random instances.
//! - **ACO**: The colony engine. Each step builds one tour per ant,
//!   evaporates and redeposits pheromone, and tracks the best tour.
//!   Runs either to completion or interactively through a worker-thread
//!   driver that supports pause, resume and cancel between iterations.
//!
//! # Example
//!
//! ```
//! use u_aco::aco::{format_route, AcoConfig, AntColony};
//! use u_aco::distance::{random_points, DistanceMatrix};
//!
//! let points = random_points(12, 42, 100.0);
//! let config = AcoConfig::default()
//!     .with_n_ants(20)
//!     .with_n_best(5)
//!     .with_n_iterations(100)
//!     .with_decay(0.3)
//!     .with_beta(3.0)
//!     .with_seed(42);
//!
//! let mut colony = AntColony::new(DistanceMatrix::from_points(&points), config)?;
//! let result = colony.run(false);
//!
//! let route = result.best_route.expect("at least one iteration ran");
//! println!("{:.2}: {}", result.best_distance, format_route(&route));
//! # Ok::<(), u_aco::AcoError>(())
//! ```

pub mod aco;
pub mod distance;
mod error;

pub use error::AcoError;

//! Weighted closed-tour planning with Tabu Search.
//!
//! Given N locations, each with a cost weight, and a symmetric distance
//! matrix, find a tour that visits every location once and returns to the
//! start while minimizing
//!
//! ```text
//! sum(distance(edge) * weight(arrival)) + max(0, total_distance - budget) * penalty_rate
//! ```
//!
//! - [`problem`]: locations, distance matrices, tours and the cost model,
//!   plus pluggable distance providers (including random mock distances).
//! - [`tabu`]: the step-wise Tabu Search engine and a run-to-completion
//!   driver.
//! - [`recorder`]: sinks that receive one event per search step.
//!
//! # Architecture
//!
//! The engine holds all search state and advances only when
//! [`tabu::TabuEngine::step`] is called, so it can be interleaved with any
//! UI or run in a tight loop. Presentation is left to [`recorder::RunRecorder`]
//! implementations.
//!
//! # Examples
//!
//! ```
//! use u_tourtabu::problem::{Location, RandomDistances, RoutingProblem};
//! use u_tourtabu::tabu::{TabuConfig, TabuRunner};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let locations = vec![
//!     Location::new("Depot", 1.0),
//!     Location::new("Market", 1.5),
//!     Location::new("Harbor", 2.0),
//!     Location::new("Museum", 1.0),
//! ];
//! let problem = RoutingProblem::with_provider(locations, &RandomDistances::default(), &mut rng)?;
//! let result = TabuRunner::run(&problem, &TabuConfig::default().with_seed(7), &mut ())?;
//! println!("{}: {:.2}", problem.route_names(&result.best), result.best_cost.total_cost);
//! # Ok::<(), u_tourtabu::PlannerError>(())
//! ```

pub mod error;
pub mod problem;
pub mod recorder;
pub mod tabu;

pub use error::{PlannerError, Result};

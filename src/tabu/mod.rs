//! Tabu Search (TS) over weighted closed tours.
//!
//! A single-solution trajectory metaheuristic that remembers recently
//! adopted tours (the tabu list) and refuses to revisit them, so the search
//! keeps moving instead of cycling around a local optimum. When every
//! neighbor is tabu, the cheapest one is taken anyway (aspiration).
//!
//! The neighborhood is every tour one position swap away. The engine is
//! driven one step at a time; see [`TabuEngine`].
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod engine;
mod memory;
mod neighborhood;
mod runner;
mod types;

pub use config::{NeighborSelection, TabuConfig};
pub use engine::TabuEngine;
pub use memory::TabuMemory;
pub use neighborhood::{neighbors, swap_moves, SwapMove};
pub use runner::{TabuResult, TabuRunner};
pub use types::{EngineStatus, StepEvent, StepOutcome, StepStatus, TerminationReason};

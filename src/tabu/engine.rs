//! Step-wise Tabu Search engine for weighted tours.
//!
//! # Algorithm
//!
//! 1. Start from a random permutation; it is both current and best.
//! 2. At each step:
//!    a. Generate every single-swap neighbor of the current tour
//!    b. Evaluate each and flag those held in tabu memory
//!    c. Select a non-tabu neighbor (see [`NeighborSelection`]); if all are
//!       tabu, take the cheapest tabu one (aspiration)
//!    d. Adopt it, update the best and the stagnation counter
//!    e. Record it in tabu memory
//! 3. Terminate at the iteration cap or the stagnation cap, checked at the
//!    start of the following step.
//!
//! The engine never blocks and has no timing of its own: drivers call
//! [`TabuEngine::step`] in a loop or on their own schedule.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::config::{NeighborSelection, TabuConfig};
use super::memory::TabuMemory;
use super::neighborhood::{swap_moves, SwapMove};
use super::types::{EngineStatus, StepEvent, StepOutcome, StepStatus, TerminationReason};
use crate::error::{PlannerError, Result};
use crate::problem::{CostBreakdown, CostModel, DistanceMatrix, Location, RoutingProblem, Tour};

/// An evaluated neighbor.
#[derive(Debug, Clone)]
struct Candidate {
    mv: SwapMove,
    cost: CostBreakdown,
    tabu: bool,
}

/// Tabu Search over closed tours, advanced one step at a time.
///
/// All search state (current tour, best tour, counters, tabu memory) is
/// owned here. Callers only ever see clones through [`StepEvent`]s and
/// accessors.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::{DistanceMatrix, Location};
/// use u_tourtabu::tabu::{StepOutcome, TabuConfig, TabuEngine};
///
/// let locations = vec![
///     Location::new("A", 1.0),
///     Location::new("B", 1.0),
///     Location::new("C", 1.0),
/// ];
/// let distances = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ]).unwrap();
/// let config = TabuConfig::default()
///     .with_penalty_rate(0.0)
///     .with_iteration_cap(10)
///     .with_seed(42);
///
/// let mut engine = TabuEngine::new(locations, distances, config).unwrap();
/// while let Ok(StepOutcome::Event(_)) = engine.step() {}
///
/// let (_, cost) = engine.best();
/// assert_eq!(cost.total_cost, 45.0);
/// ```
#[derive(Debug, Clone)]
pub struct TabuEngine {
    problem: RoutingProblem,
    model: CostModel,
    config: TabuConfig,
    initial: Tour,
    initial_cost: CostBreakdown,
    current: Tour,
    current_cost: CostBreakdown,
    best: Tour,
    best_cost: CostBreakdown,
    best_iteration: usize,
    iteration: usize,
    stagnation_count: usize,
    tabu: TabuMemory,
    status: EngineStatus,
    termination: Option<TerminationReason>,
}

impl TabuEngine {
    /// Creates an engine from raw problem data.
    ///
    /// Fails with [`PlannerError::InvalidInput`] for fewer than two
    /// locations, a non-positive weight, a negative penalty rate, or a
    /// matrix that does not match the locations.
    pub fn new(
        locations: Vec<Location>,
        distances: DistanceMatrix,
        config: TabuConfig,
    ) -> Result<Self> {
        Self::from_problem(RoutingProblem::new(locations, distances)?, config)
    }

    /// Creates an engine whose initial tour is shuffled with `config.seed`.
    pub fn from_problem(problem: RoutingProblem, config: TabuConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(problem, config, &mut rng)
    }

    /// Creates an engine whose initial tour is shuffled with `rng`.
    pub fn with_rng<R: Rng>(problem: RoutingProblem, config: TabuConfig, rng: &mut R) -> Result<Self> {
        let initial = Tour::random(problem.len(), rng);
        Self::with_initial_tour(problem, config, initial)
    }

    /// Creates an engine starting from a given tour.
    pub fn with_initial_tour(
        problem: RoutingProblem,
        config: TabuConfig,
        initial: Tour,
    ) -> Result<Self> {
        config.validate().map_err(PlannerError::InvalidInput)?;
        initial.validate(problem.len())?;
        let model = problem.cost_model(config.penalty_rate, config.distance_budget)?;
        let cost = model.evaluate(&initial);
        let tabu = TabuMemory::new(config.tabu_capacity);

        Ok(Self {
            problem,
            model,
            config,
            initial: initial.clone(),
            initial_cost: cost,
            current: initial.clone(),
            current_cost: cost,
            best: initial,
            best_cost: cost,
            best_iteration: 0,
            iteration: 0,
            stagnation_count: 0,
            tabu,
            status: EngineStatus::Initialized,
            termination: None,
        })
    }

    /// Advances the search by one move.
    ///
    /// Returns [`StepOutcome::Terminated`] once, on the first call after a
    /// cap is reached or the neighborhood is empty. Any later call fails
    /// with [`PlannerError::InvalidState`] and leaves the engine untouched.
    pub fn step(&mut self) -> Result<StepOutcome> {
        match self.status {
            EngineStatus::Terminated => {
                return Err(PlannerError::InvalidState(format!(
                    "search already terminated: {}",
                    self.termination.unwrap_or(TerminationReason::Stopped)
                )));
            }
            EngineStatus::Initialized => {
                self.status = EngineStatus::Running;
                info!(
                    event = "search_start",
                    locations = self.problem.len(),
                    initial_cost = self.initial_cost.total_cost,
                    iteration_cap = self.config.iteration_cap,
                    stagnation_cap = self.config.stagnation_cap,
                    tabu_capacity = self.config.tabu_capacity,
                );
            }
            EngineStatus::Running => {}
        }

        if let Some(reason) = self.cap_reached() {
            return Ok(self.terminate(reason));
        }

        let mut candidates = self.evaluate_neighborhood();
        trace!(
            iteration = self.iteration,
            neighbors = candidates.len(),
            tabu = candidates.iter().filter(|c| c.tabu).count(),
        );

        let Some((index, aspiration)) = select(&candidates, self.config.selection) else {
            return Ok(self.terminate(TerminationReason::EmptyNeighborhood));
        };
        let chosen = candidates.swap_remove(index);
        Ok(StepOutcome::Event(self.adopt(chosen, aspiration)))
    }

    /// Terminates the search before its caps are reached.
    ///
    /// The best solution stays valid. Has no effect once terminated.
    pub fn stop(&mut self) {
        if self.status != EngineStatus::Terminated {
            self.terminate(TerminationReason::Stopped);
        }
    }

    /// Returns `true` once no further move will be made: a cap has been
    /// reached, the neighborhood was empty, or [`stop`](Self::stop) was called.
    pub fn is_terminated(&self) -> bool {
        self.termination_reason().is_some()
    }

    /// Why the search has stopped (or will stop on the next step).
    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.termination.or_else(|| self.cap_reached())
    }

    /// Best tour found so far and its cost.
    pub fn best(&self) -> (&Tour, &CostBreakdown) {
        (&self.best, &self.best_cost)
    }

    /// Snapshot of the starting tour as an iteration-0 event.
    pub fn initial_event(&self) -> StepEvent {
        StepEvent {
            iteration: 0,
            tour: self.initial.clone(),
            cost: self.initial_cost,
            swap: None,
            tabu_size: 0,
            aspiration: false,
            status: StepStatus::Initial,
            best_cost: self.initial_cost.total_cost,
        }
    }

    /// Tour adopted by the latest step.
    pub fn current(&self) -> &Tour {
        &self.current
    }

    /// Cost of the current tour.
    pub fn current_cost(&self) -> &CostBreakdown {
        &self.current_cost
    }

    /// Number of steps taken.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Consecutive steps without a new best.
    pub fn stagnation_count(&self) -> usize {
        self.stagnation_count
    }

    /// Step at which the current best was found (0 for the initial tour).
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    /// Tabu memory of recently adopted tours.
    pub fn tabu(&self) -> &TabuMemory {
        &self.tabu
    }

    /// Lifecycle state.
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    /// Problem being solved.
    pub fn problem(&self) -> &RoutingProblem {
        &self.problem
    }

    /// Cost model used to score tours.
    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    /// Search parameters.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    fn cap_reached(&self) -> Option<TerminationReason> {
        if self.iteration >= self.config.iteration_cap {
            Some(TerminationReason::IterationCap)
        } else if self.stagnation_count >= self.config.stagnation_cap {
            Some(TerminationReason::Stagnation)
        } else {
            None
        }
    }

    fn terminate(&mut self, reason: TerminationReason) -> StepOutcome {
        self.status = EngineStatus::Terminated;
        self.termination = Some(reason);
        info!(
            event = "search_end",
            reason = %reason,
            iterations = self.iteration,
            best_cost = self.best_cost.total_cost,
            best_iteration = self.best_iteration,
        );
        StepOutcome::Terminated(reason)
    }

    fn evaluate_neighborhood(&self) -> Vec<Candidate> {
        let moves = swap_moves(&self.current);

        #[cfg(feature = "parallel")]
        let moves = moves.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let moves = moves.into_iter();

        moves
            .map(|mv| {
                let cost = self.model.evaluate(&mv.tour);
                let tabu = self.tabu.contains(&mv.tour);
                Candidate { mv, cost, tabu }
            })
            .collect()
    }

    fn adopt(&mut self, chosen: Candidate, aspiration: bool) -> StepEvent {
        let Candidate { mv, cost, .. } = chosen;

        self.current = mv.tour.clone();
        self.current_cost = cost;

        let status = if cost.total_cost < self.best_cost.total_cost {
            self.best = mv.tour.clone();
            self.best_cost = cost;
            self.best_iteration = self.iteration + 1;
            self.stagnation_count = 0;
            StepStatus::Improved
        } else {
            self.stagnation_count += 1;
            StepStatus::NoImprovement
        };

        self.tabu.record(mv.tour.clone());
        self.iteration += 1;

        debug!(
            iteration = self.iteration,
            swap_i = mv.i,
            swap_j = mv.j,
            total_cost = cost.total_cost,
            best_cost = self.best_cost.total_cost,
            aspiration,
            improved = status == StepStatus::Improved,
            stagnation = self.stagnation_count,
        );

        StepEvent {
            iteration: self.iteration,
            tour: mv.tour,
            cost,
            swap: Some((mv.i, mv.j)),
            tabu_size: self.tabu.len(),
            aspiration,
            status,
            best_cost: self.best_cost.total_cost,
        }
    }
}

/// Picks a candidate index and whether aspiration was needed.
fn select(candidates: &[Candidate], rule: NeighborSelection) -> Option<(usize, bool)> {
    let admissible = match rule {
        // First non-tabu candidate strictly below an infinite threshold.
        NeighborSelection::FirstAdmissible => candidates
            .iter()
            .position(|c| !c.tabu && c.cost.total_cost < f64::INFINITY),
        NeighborSelection::BestAdmissible => cheapest(candidates, |c| !c.tabu),
    };
    match admissible {
        Some(i) => Some((i, false)),
        None => cheapest(candidates, |c| c.tabu).map(|i| (i, true)),
    }
}

/// Index of the minimum-cost candidate passing `filter`; ties keep the earliest.
fn cheapest(candidates: &[Candidate], filter: impl Fn(&Candidate) -> bool) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        if !filter(c) {
            continue;
        }
        if best.is_none_or(|(_, cost)| c.cost.total_cost < cost) {
            best = Some((i, c.cost.total_cost));
        }
    }
    best.map(|(i, _)| i)
}

//! Run-to-completion driver around [`TabuEngine`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::TabuConfig;
use super::engine::TabuEngine;
use super::types::{EngineStatus, StepOutcome, TerminationReason};
use crate::error::{PlannerError, Result};
use crate::problem::{CostBreakdown, Leg, RoutingProblem, Tour};
use crate::recorder::RunRecorder;

/// Result of a Tabu Search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best tour found.
    pub best: Tour,
    /// Cost of the best tour.
    pub best_cost: CostBreakdown,
    /// Per-edge costs of the best tour.
    pub legs: Vec<Leg>,
    /// Total steps executed.
    pub iterations: usize,
    /// Step at which the best tour was found (0 for the initial tour).
    pub best_iteration: usize,
    /// Why the run stopped.
    pub termination: TerminationReason,
    /// Best total cost before the first step and after every step.
    pub cost_history: Vec<f64>,
}

/// Drives a [`TabuEngine`] until it terminates.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs the search, reporting each step to `recorder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tourtabu::problem::{Location, RandomDistances, RoutingProblem};
    /// use u_tourtabu::recorder::HistoryRecorder;
    /// use u_tourtabu::tabu::{TabuConfig, TabuRunner};
    /// use rand::SeedableRng;
    ///
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let locations = (0..5).map(|i| Location::new(format!("L{i}"), 1.0)).collect();
    /// let problem = RoutingProblem::with_provider(locations, &RandomDistances::default(), &mut rng).unwrap();
    ///
    /// let mut history = HistoryRecorder::default();
    /// let result = TabuRunner::run(&problem, &TabuConfig::default().with_seed(42), &mut history).unwrap();
    /// assert_eq!(history.events.len(), result.iterations);
    /// ```
    pub fn run<R: RunRecorder>(
        problem: &RoutingProblem,
        config: &TabuConfig,
        recorder: &mut R,
    ) -> Result<TabuResult> {
        Self::run_with_cancel(problem, config, recorder, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next step and
    /// returns the best tour found so far.
    pub fn run_with_cancel<R: RunRecorder>(
        problem: &RoutingProblem,
        config: &TabuConfig,
        recorder: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        let engine = TabuEngine::from_problem(problem.clone(), config.clone())?;
        Self::drive(engine, recorder, cancel)
    }

    /// Drives a freshly constructed engine to termination.
    ///
    /// Fails with [`PlannerError::InvalidState`] if the engine has already
    /// been stepped or stopped, since its earlier history cannot be recorded.
    pub fn drive<R: RunRecorder>(
        mut engine: TabuEngine,
        recorder: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TabuResult> {
        if engine.status() != EngineStatus::Initialized {
            return Err(PlannerError::InvalidState(format!(
                "engine must be unstepped to drive, found {:?} at iteration {}",
                engine.status(),
                engine.iteration()
            )));
        }
        let initial = engine.initial_event();
        let mut cost_history = vec![engine.best().1.total_cost];
        recorder.on_start(&initial);

        let termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    engine.stop();
                    break TerminationReason::Stopped;
                }
            }

            match engine.step()? {
                StepOutcome::Event(event) => {
                    cost_history.push(event.best_cost);
                    recorder.on_step(&event);
                }
                StepOutcome::Terminated(reason) => break reason,
            }
        };

        let (best, best_cost) = engine.best();
        let result = TabuResult {
            best: best.clone(),
            best_cost: *best_cost,
            legs: engine.cost_model().legs(best),
            iterations: engine.iteration(),
            best_iteration: engine.best_iteration(),
            termination,
            cost_history,
        };
        recorder.on_finish(&result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{DistanceMatrix, Location, RandomDistances};
    use crate::recorder::HistoryRecorder;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn problem(n: usize, seed: u64) -> RoutingProblem {
        let mut rng = StdRng::seed_from_u64(seed);
        let locations = (0..n)
            .map(|i| Location::new(format!("L{i}"), rng.random_range(1.0..2.0)))
            .collect();
        RoutingProblem::with_provider(locations, &RandomDistances::default(), &mut rng).unwrap()
    }

    #[test]
    fn test_run_triangle() {
        let problem = RoutingProblem::new(
            vec![
                Location::new("A", 1.0),
                Location::new("B", 1.0),
                Location::new("C", 1.0),
            ],
            DistanceMatrix::new(vec![
                vec![0.0, 10.0, 20.0],
                vec![10.0, 0.0, 15.0],
                vec![20.0, 15.0, 0.0],
            ])
            .unwrap(),
        )
        .unwrap();
        let config = TabuConfig::default()
            .with_penalty_rate(0.0)
            .with_iteration_cap(10)
            .with_seed(42);

        let result = TabuRunner::run(&problem, &config, &mut ()).unwrap();

        assert_eq!(result.best_cost.total_cost, 45.0);
        assert!(result.best.validate(3).is_ok());
        assert_eq!(result.legs.len(), 3);
        assert!((result.legs[2].cumulative_cost - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let config = TabuConfig::default().with_seed(42);
        let result = TabuRunner::run(&problem(9, 1), &config, &mut ()).unwrap();

        assert_eq!(result.cost_history.len(), result.iterations + 1);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(
            result.cost_history.last().copied(),
            Some(result.best_cost.total_cost)
        );
    }

    #[test]
    fn test_terminates_at_a_cap() {
        let config = TabuConfig::default()
            .with_iteration_cap(30)
            .with_stagnation_cap(8)
            .with_seed(7);
        let result = TabuRunner::run(&problem(7, 2), &config, &mut ()).unwrap();

        match result.termination {
            TerminationReason::IterationCap => assert_eq!(result.iterations, 30),
            TerminationReason::Stagnation => {
                assert!(result.iterations < 30);
                assert_eq!(result.iterations - result.best_iteration, 8);
            }
            other => panic!("unexpected termination {other:?}"),
        }
    }

    #[test]
    fn test_recorder_sees_every_step() {
        let config = TabuConfig::default().with_seed(3);
        let mut history = HistoryRecorder::default();
        let result = TabuRunner::run(&problem(6, 5), &config, &mut history).unwrap();

        assert_eq!(history.initial.as_ref().map(|e| e.iteration), Some(0));
        assert_eq!(history.events.len(), result.iterations);
        for (k, e) in history.events.iter().enumerate() {
            assert_eq!(e.iteration, k + 1);
        }
        assert_eq!(history.result.as_ref(), Some(&result));
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = Arc::new(AtomicBool::new(true));
        let config = TabuConfig::default().with_seed(3);
        let result =
            TabuRunner::run_with_cancel(&problem(6, 5), &config, &mut (), Some(cancel)).unwrap();

        assert_eq!(result.termination, TerminationReason::Stopped);
        assert_eq!(result.iterations, 0);
        assert!(result.best.validate(6).is_ok());
    }

    #[test]
    fn test_drive_rejects_stepped_engine() {
        let config = TabuConfig::default().with_seed(3);
        let mut engine = TabuEngine::from_problem(problem(6, 5), config).unwrap();
        for _ in 0..3 {
            engine.step().unwrap();
        }
        let mut history = HistoryRecorder::default();
        let err = TabuRunner::drive(engine, &mut history, None).unwrap_err();

        assert!(matches!(err, PlannerError::InvalidState(_)));
        assert!(history.initial.is_none());
        assert!(history.events.is_empty());
    }

    #[test]
    fn test_drive_rejects_stopped_engine() {
        let config = TabuConfig::default().with_seed(3);
        let mut engine = TabuEngine::from_problem(problem(6, 5), config).unwrap();
        engine.stop();
        let err = TabuRunner::drive(engine, &mut (), None).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidState(_)));
    }

    #[test]
    fn test_drive_fresh_engine_records_full_history() {
        let config = TabuConfig::default().with_seed(3);
        let engine = TabuEngine::from_problem(problem(6, 5), config).unwrap();
        let result = TabuRunner::drive(engine, &mut (), None).unwrap();
        assert_eq!(result.cost_history.len(), result.iterations + 1);
    }

    #[test]
    fn test_invalid_config_surfaces_error() {
        let config = TabuConfig::default().with_penalty_rate(-2.0);
        assert!(TabuRunner::run(&problem(4, 0), &config, &mut ()).is_err());
    }
}

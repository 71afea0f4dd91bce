//! Sinks for search progress.
//!
//! A [`RunRecorder`] receives the initial snapshot, one [`StepEvent`] per
//! step, and the final [`TabuResult`]. How they are shown (table, chart,
//! log) is up to the implementation.

use tracing::info;

use crate::problem::RoutingProblem;
use crate::tabu::{StepEvent, TabuResult};

/// Consumer of engine events.
pub trait RunRecorder {
    /// Called once with the iteration-0 snapshot before the first step.
    fn on_start(&mut self, _initial: &StepEvent) {}

    /// Called after every adopted move.
    fn on_step(&mut self, event: &StepEvent);

    /// Called once with the final result.
    fn on_finish(&mut self, _result: &TabuResult) {}
}

/// Discards everything.
impl RunRecorder for () {
    fn on_step(&mut self, _event: &StepEvent) {}
}

/// Keeps every event in memory, e.g. to render an iteration table later.
#[derive(Debug, Clone, Default)]
pub struct HistoryRecorder {
    /// Snapshot of the starting tour.
    pub initial: Option<StepEvent>,
    /// Events in step order.
    pub events: Vec<StepEvent>,
    /// Final result, once finished.
    pub result: Option<TabuResult>,
}

impl HistoryRecorder {
    /// Events where the aspiration criterion was used.
    pub fn aspiration_steps(&self) -> impl Iterator<Item = &StepEvent> {
        self.events.iter().filter(|e| e.aspiration)
    }
}

impl RunRecorder for HistoryRecorder {
    fn on_start(&mut self, initial: &StepEvent) {
        self.initial = Some(initial.clone());
        self.events.clear();
        self.result = None;
    }

    fn on_step(&mut self, event: &StepEvent) {
        self.events.push(event.clone());
    }

    fn on_finish(&mut self, result: &TabuResult) {
        self.result = Some(result.clone());
    }
}

/// Emits each event as an `info` log line with named routes.
#[derive(Debug, Clone)]
pub struct TracingRecorder {
    problem: RoutingProblem,
}

impl TracingRecorder {
    pub fn new(problem: &RoutingProblem) -> Self {
        Self {
            problem: problem.clone(),
        }
    }

    fn log(&self, event: &StepEvent) {
        info!(
            event = "step",
            iteration = event.iteration,
            route = %self.problem.route_names(&event.tour),
            total_cost = format!("{:.2}", event.cost.total_cost),
            action = %event.action(),
            status = %event.status,
        );
    }
}

impl RunRecorder for TracingRecorder {
    fn on_start(&mut self, initial: &StepEvent) {
        self.log(initial);
    }

    fn on_step(&mut self, event: &StepEvent) {
        self.log(event);
    }

    fn on_finish(&mut self, result: &TabuResult) {
        info!(
            event = "result",
            route = %self.problem.route_names(&result.best),
            total_distance = format!("{:.2}", result.best_cost.total_distance),
            penalty = format!("{:.2}", result.best_cost.penalty),
            total_cost = format!("{:.2}", result.best_cost.total_cost),
            iterations = result.iterations,
            reason = %result.termination,
        );
    }
}

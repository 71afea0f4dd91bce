//! Engine states and per-step events.

use std::fmt;

use crate::problem::{CostBreakdown, Tour};

/// Lifecycle of a [`TabuEngine`](super::TabuEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineStatus {
    /// Constructed, no step taken yet.
    Initialized,
    /// At least one step taken and not yet terminated.
    Running,
    /// No further steps will be taken.
    Terminated,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The iteration cap was reached.
    IterationCap,
    /// Too many consecutive steps without improving the best cost.
    Stagnation,
    /// The current tour has no neighbors.
    EmptyNeighborhood,
    /// The driver requested a stop.
    Stopped,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TerminationReason::IterationCap => "iteration cap reached",
            TerminationReason::Stagnation => "no improvement within stagnation cap",
            TerminationReason::EmptyNeighborhood => "no neighbors to move to",
            TerminationReason::Stopped => "stopped by caller",
        };
        f.write_str(s)
    }
}

/// Outcome of a step relative to the best-known solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepStatus {
    /// Snapshot of the starting tour, before any move.
    Initial,
    /// The adopted tour became the new best.
    Improved,
    /// The adopted tour did not beat the best.
    NoImprovement,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Initial => "Initial",
            StepStatus::Improved => "Improved",
            StepStatus::NoImprovement => "No Improvement",
        };
        f.write_str(s)
    }
}

/// Read-only record of one engine step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepEvent {
    /// Step number, starting at 1 (0 for the initial snapshot).
    pub iteration: usize,
    /// The adopted tour.
    pub tour: Tour,
    /// Cost of the adopted tour.
    pub cost: CostBreakdown,
    /// Positions swapped to reach `tour`, `None` for the initial snapshot.
    pub swap: Option<(usize, usize)>,
    /// Tabu memory size after recording `tour`.
    pub tabu_size: usize,
    /// Whether every neighbor was tabu and the best tabu one was taken.
    pub aspiration: bool,
    /// Improvement status.
    pub status: StepStatus,
    /// Best total cost known after this step.
    pub best_cost: f64,
}

impl StepEvent {
    /// Short description of the tabu action, e.g. `Tabu List: 3 (Aspiration Used)`.
    pub fn action(&self) -> String {
        if self.status == StepStatus::Initial {
            return "Initialization".to_string();
        }
        let mut s = format!("Tabu List: {}", self.tabu_size);
        if self.aspiration {
            s.push_str(" (Aspiration Used)");
        }
        s
    }
}

/// Result of a call to [`TabuEngine::step`](super::TabuEngine::step).
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// A move was adopted.
    Event(StepEvent),
    /// The engine stopped; no move was made.
    Terminated(TerminationReason),
}

impl StepOutcome {
    /// The event, if a move was adopted.
    pub fn event(&self) -> Option<&StepEvent> {
        match self {
            StepOutcome::Event(e) => Some(e),
            StepOutcome::Terminated(_) => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, StepOutcome::Terminated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(aspiration: bool, status: StepStatus) -> StepEvent {
        StepEvent {
            iteration: 3,
            tour: Tour::identity(3),
            cost: CostBreakdown::default(),
            swap: Some((0, 1)),
            tabu_size: 3,
            aspiration,
            status,
            best_cost: 0.0,
        }
    }

    #[test]
    fn test_action_text() {
        assert_eq!(event(false, StepStatus::Improved).action(), "Tabu List: 3");
        assert_eq!(
            event(true, StepStatus::NoImprovement).action(),
            "Tabu List: 3 (Aspiration Used)"
        );
        assert_eq!(event(false, StepStatus::Initial).action(), "Initialization");
    }

    #[test]
    fn test_outcome_accessors() {
        let e = StepOutcome::Event(event(false, StepStatus::Improved));
        assert!(e.event().is_some());
        assert!(!e.is_terminated());

        let t = StepOutcome::Terminated(TerminationReason::Stagnation);
        assert!(t.event().is_none());
        assert!(t.is_terminated());
    }
}

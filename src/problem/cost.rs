//! Weighted tour cost with an over-budget distance penalty.

use super::types::{DistanceMatrix, Location, Tour};
use crate::error::{PlannerError, Result};

/// Reference distance budget; travel beyond it is penalized.
pub const DEFAULT_DISTANCE_BUDGET: f64 = 300.0;

/// Cost components of a single tour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    /// Plain sum of edge distances around the cycle.
    pub total_distance: f64,
    /// `max(0, total_distance - budget) * penalty_rate`.
    pub penalty: f64,
    /// Weighted edge sum plus penalty. This is the minimized objective.
    pub total_cost: f64,
}

/// One edge of a tour with its share of the weighted cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Departure location index.
    pub from: usize,
    /// Arrival location index.
    pub to: usize,
    /// Edge distance.
    pub distance: f64,
    /// Weight of the arrival location.
    pub weight: f64,
    /// `distance * weight`.
    pub cost: f64,
    /// Running total of `cost` up to and including this leg (penalty excluded).
    pub cumulative_cost: f64,
}

/// Evaluates tours against a fixed distance matrix and weight vector.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::{CostModel, DistanceMatrix, Tour};
///
/// let m = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ]).unwrap();
/// let model = CostModel::new(m, vec![1.0, 1.0, 1.0], 0.0, 300.0).unwrap();
/// let cost = model.evaluate(&Tour::identity(3));
/// assert_eq!(cost.total_cost, 45.0);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    distances: DistanceMatrix,
    weights: Vec<f64>,
    penalty_rate: f64,
    distance_budget: f64,
}

impl CostModel {
    /// Creates a cost model, validating that weights match the matrix.
    pub fn new(
        distances: DistanceMatrix,
        weights: Vec<f64>,
        penalty_rate: f64,
        distance_budget: f64,
    ) -> Result<Self> {
        if weights.len() != distances.len() {
            return Err(PlannerError::InvalidInput(format!(
                "{} weights given for a {}x{} distance matrix",
                weights.len(),
                distances.len(),
                distances.len()
            )));
        }
        if let Some((i, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w <= 0.0)
        {
            return Err(PlannerError::InvalidInput(format!(
                "weight {i} must be positive, got {w}"
            )));
        }
        if !penalty_rate.is_finite() || penalty_rate < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "penalty_rate must be non-negative, got {penalty_rate}"
            )));
        }
        if !distance_budget.is_finite() || distance_budget < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "distance_budget must be non-negative, got {distance_budget}"
            )));
        }
        Ok(Self {
            distances,
            weights,
            penalty_rate,
            distance_budget,
        })
    }

    /// Builds a model from location weights.
    pub fn from_locations(
        locations: &[Location],
        distances: DistanceMatrix,
        penalty_rate: f64,
        distance_budget: f64,
    ) -> Result<Self> {
        let weights = locations.iter().map(|l| l.weight).collect();
        Self::new(distances, weights, penalty_rate, distance_budget)
    }

    /// Computes the cost breakdown of `tour`.
    ///
    /// The tour is assumed to be a permutation of all location indices.
    /// Out-of-range indices contribute nothing rather than panicking.
    pub fn evaluate(&self, tour: &Tour) -> CostBreakdown {
        let n = tour.len();
        let mut total_distance = 0.0;
        let mut weighted = 0.0;

        for i in 0..n {
            let src = tour[i];
            let dst = tour[(i + 1) % n];
            let d = self.distances.get(src, dst).unwrap_or(0.0);
            total_distance += d;
            weighted += d * self.weights.get(dst).copied().unwrap_or(0.0);
        }

        let penalty = self.penalty_for(total_distance);
        CostBreakdown {
            total_distance,
            penalty,
            total_cost: weighted + penalty,
        }
    }

    /// Per-edge costs of `tour` with running totals.
    pub fn legs(&self, tour: &Tour) -> Vec<Leg> {
        let n = tour.len();
        let mut cumulative = 0.0;
        (0..n)
            .map(|i| {
                let from = tour[i];
                let to = tour[(i + 1) % n];
                let distance = self.distances.get(from, to).unwrap_or(0.0);
                let weight = self.weights.get(to).copied().unwrap_or(0.0);
                let cost = distance * weight;
                cumulative += cost;
                Leg {
                    from,
                    to,
                    distance,
                    weight,
                    cost,
                    cumulative_cost: cumulative,
                }
            })
            .collect()
    }

    fn penalty_for(&self, total_distance: f64) -> f64 {
        (total_distance - self.distance_budget).max(0.0) * self.penalty_rate
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if the model covers no locations.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn penalty_rate(&self) -> f64 {
        self.penalty_rate
    }

    pub fn distance_budget(&self) -> f64 {
        self.distance_budget
    }
}

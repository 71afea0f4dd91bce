//! Weighted closed-tour problem definition.
//!
//! A problem is a list of [`Location`]s and a symmetric [`DistanceMatrix`].
//! Tours are scored by [`CostModel`]: each edge contributes its distance
//! times the weight of the location it arrives at, and total distance beyond
//! a budget is charged at a fixed penalty rate.

mod cost;
mod distance;
mod types;

pub use cost::{CostBreakdown, CostModel, Leg, DEFAULT_DISTANCE_BUDGET};
pub use distance::{DistanceProvider, FixedDistances, RandomDistances};
pub use types::{DistanceMatrix, Location, Tour};

use rand::Rng;

use crate::error::{PlannerError, Result};

/// Validated problem data: locations plus their pairwise distances.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::{DistanceMatrix, Location, RoutingProblem, Tour};
///
/// let problem = RoutingProblem::new(
///     vec![Location::new("A", 1.0), Location::new("B", 1.0)],
///     DistanceMatrix::new(vec![vec![0.0, 4.0], vec![4.0, 0.0]]).unwrap(),
/// ).unwrap();
/// assert_eq!(problem.route_names(&Tour::identity(2)), "A → B");
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    locations: Vec<Location>,
    distances: DistanceMatrix,
}

impl RoutingProblem {
    /// Minimum number of locations for a meaningful tour.
    pub const MIN_LOCATIONS: usize = 2;

    /// Creates a problem, rejecting too few locations, non-positive weights,
    /// or a matrix whose size does not match the location count.
    pub fn new(locations: Vec<Location>, distances: DistanceMatrix) -> Result<Self> {
        if locations.len() < Self::MIN_LOCATIONS {
            return Err(PlannerError::InvalidInput(format!(
                "at least {} locations are required, got {}",
                Self::MIN_LOCATIONS,
                locations.len()
            )));
        }
        for location in &locations {
            location.validate()?;
        }
        if distances.len() != locations.len() {
            return Err(PlannerError::InvalidInput(format!(
                "distance matrix covers {} locations, but {} were given",
                distances.len(),
                locations.len()
            )));
        }
        Ok(Self {
            locations,
            distances,
        })
    }

    /// Creates a problem whose distances come from `provider`.
    pub fn with_provider<D: DistanceProvider, R: Rng>(
        locations: Vec<Location>,
        provider: &D,
        rng: &mut R,
    ) -> Result<Self> {
        let distances = provider.distances(locations.len(), rng)?;
        Self::new(locations, distances)
    }

    /// Builds the cost model for this problem.
    pub fn cost_model(&self, penalty_rate: f64, distance_budget: f64) -> Result<CostModel> {
        CostModel::from_locations(
            &self.locations,
            self.distances.clone(),
            penalty_rate,
            distance_budget,
        )
    }

    /// Location names along `tour`, joined with arrows.
    pub fn route_names(&self, tour: &Tour) -> String {
        tour.iter()
            .map(|&i| self.locations.get(i).map_or("?", |l| l.name.as_str()))
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Locations in index order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Pairwise distances.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Always `false` for a constructed problem.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

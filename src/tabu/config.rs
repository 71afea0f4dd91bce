//! Tabu Search configuration.

use crate::problem::DEFAULT_DISTANCE_BUDGET;

/// How a non-tabu neighbor is picked from the neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeighborSelection {
    /// Earliest-generated non-tabu neighbor, regardless of its cost.
    ///
    /// The scan compares each candidate against a running threshold that
    /// starts at infinity and stops at the first success, so the first
    /// admissible neighbor always wins.
    #[default]
    FirstAdmissible,
    /// Minimum-cost non-tabu neighbor; ties go to the earliest generated.
    BestAdmissible,
}

/// Configuration parameters for the tour Tabu Search.
///
/// # Examples
///
/// ```
/// use u_tourtabu::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_iteration_cap(100)
///     .with_tabu_capacity(5)
///     .with_penalty_rate(2.0)
///     .with_seed(7);
/// assert_eq!(config.iteration_cap, 100);
/// assert_eq!(config.stagnation_cap, 15);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabuConfig {
    /// Maximum number of steps.
    pub iteration_cap: usize,
    /// Consecutive non-improving steps before stopping.
    pub stagnation_cap: usize,
    /// Number of adopted tours remembered as tabu.
    pub tabu_capacity: usize,
    /// Cost per distance unit beyond `distance_budget`.
    pub penalty_rate: f64,
    /// Total distance allowed before the penalty applies.
    pub distance_budget: f64,
    /// Non-tabu selection rule.
    pub selection: NeighborSelection,
    /// Random seed for the initial tour (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iteration_cap: 50,
            stagnation_cap: 15,
            tabu_capacity: 7,
            penalty_rate: 0.5,
            distance_budget: DEFAULT_DISTANCE_BUDGET,
            selection: NeighborSelection::default(),
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of steps.
    pub fn with_iteration_cap(mut self, n: usize) -> Self {
        self.iteration_cap = n;
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_cap(mut self, n: usize) -> Self {
        self.stagnation_cap = n;
        self
    }

    /// Sets the tabu memory capacity.
    pub fn with_tabu_capacity(mut self, k: usize) -> Self {
        self.tabu_capacity = k;
        self
    }

    /// Sets the cost per distance unit beyond the budget.
    pub fn with_penalty_rate(mut self, rate: f64) -> Self {
        self.penalty_rate = rate;
        self
    }

    /// Sets the total distance allowed before the penalty applies.
    pub fn with_distance_budget(mut self, budget: f64) -> Self {
        self.distance_budget = budget;
        self
    }

    /// Sets the non-tabu selection rule.
    pub fn with_selection(mut self, selection: NeighborSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.penalty_rate.is_finite() || self.penalty_rate < 0.0 {
            return Err(format!(
                "penalty_rate must be non-negative, got {}",
                self.penalty_rate
            ));
        }
        if !self.distance_budget.is_finite() || self.distance_budget < 0.0 {
            return Err(format!(
                "distance_budget must be non-negative, got {}",
                self.distance_budget
            ));
        }
        Ok(())
    }

    /// Parses a configuration from TOML; missing keys take default values.
    ///
    /// ```
    /// use u_tourtabu::tabu::{NeighborSelection, TabuConfig};
    ///
    /// let config = TabuConfig::from_toml_str(r#"
    ///     iteration_cap = 80
    ///     penalty_rate = 2.0
    ///     selection = "best_admissible"
    /// "#).unwrap();
    /// assert_eq!(config.iteration_cap, 80);
    /// assert_eq!(config.tabu_capacity, 7);
    /// assert_eq!(config.selection, NeighborSelection::BestAdmissible);
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> crate::error::Result<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| crate::error::PlannerError::InvalidInput(e.to_string()))?;
        config
            .validate()
            .map_err(crate::error::PlannerError::InvalidInput)?;
        Ok(config)
    }
}

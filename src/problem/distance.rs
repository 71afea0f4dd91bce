//! Pluggable distance sources.

use rand::Rng;

use super::types::DistanceMatrix;
use crate::error::{PlannerError, Result};

/// Produces the distance matrix for a problem of `n` locations.
///
/// Implementations decide where distances come from: a fixed table, a
/// coordinate set, or random mock data for demos and tests.
pub trait DistanceProvider {
    /// Builds a symmetric `n x n` matrix.
    fn distances<R: Rng>(&self, n: usize, rng: &mut R) -> Result<DistanceMatrix>;
}

/// Random symmetric integer distances drawn uniformly from `[min, max]`.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::{DistanceProvider, RandomDistances};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let m = RandomDistances::default().distances(4, &mut rng).unwrap();
/// assert_eq!(m.get(1, 3), m.get(3, 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RandomDistances {
    /// Smallest generated distance.
    pub min: u32,
    /// Largest generated distance (inclusive).
    pub max: u32,
}

impl Default for RandomDistances {
    fn default() -> Self {
        Self { min: 50, max: 200 }
    }
}

impl RandomDistances {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

impl DistanceProvider for RandomDistances {
    fn distances<R: Rng>(&self, n: usize, rng: &mut R) -> Result<DistanceMatrix> {
        if self.min > self.max {
            return Err(PlannerError::InvalidInput(format!(
                "random distance range is empty: min {} > max {}",
                self.min, self.max
            )));
        }
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = f64::from(rng.random_range(self.min..=self.max));
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }
        DistanceMatrix::new(rows)
    }
}

/// A pre-built matrix handed out unchanged.
#[derive(Debug, Clone)]
pub struct FixedDistances(pub DistanceMatrix);

impl DistanceProvider for FixedDistances {
    fn distances<R: Rng>(&self, n: usize, _rng: &mut R) -> Result<DistanceMatrix> {
        if self.0.len() != n {
            return Err(PlannerError::InvalidInput(format!(
                "fixed matrix covers {} locations, requested {n}",
                self.0.len()
            )));
        }
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_distances_in_range_and_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        let m = RandomDistances::default().distances(6, &mut rng).unwrap();
        for i in 0..6 {
            assert_eq!(m.get(i, i), Some(0.0));
            for j in 0..6 {
                let d = m.get(i, j).unwrap();
                assert_eq!(Some(d), m.get(j, i));
                if i != j {
                    assert!((50.0..=200.0).contains(&d), "distance {d} out of range");
                    assert_eq!(d.fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_random_distances_reproducible_with_seed() {
        let a = RandomDistances::default()
            .distances(5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let b = RandomDistances::default()
            .distances(5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_distances_empty_range() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(RandomDistances::new(10, 5).distances(3, &mut rng).is_err());
    }

    #[test]
    fn test_fixed_distances_size_check() {
        let m = DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let provider = FixedDistances(m.clone());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(provider.distances(2, &mut rng).unwrap(), m);
        assert!(provider.distances(3, &mut rng).is_err());
    }
}

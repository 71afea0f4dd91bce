//! Locations, distance matrices, and tours.

use std::fmt;
use std::ops::Deref;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PlannerError, Result};

/// Absolute tolerance used when checking matrix symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A named stop on the tour.
///
/// The weight multiplies the distance of every edge that *arrives* at this
/// location, so heavier locations are more expensive to travel to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Display name.
    pub name: String,
    /// Cost multiplier, strictly positive.
    pub weight: f64,
}

impl Location {
    /// Creates a location with the given name and weight.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Checks that the weight is a finite positive number.
    pub fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "weight of location '{}' must be positive, got {}",
                self.name, self.weight
            )));
        }
        Ok(())
    }
}

/// Square, symmetric, non-negative distance matrix with a zero diagonal.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::DistanceMatrix;
///
/// let m = DistanceMatrix::new(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ]).unwrap();
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.get(0, 2), Some(20.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Builds a matrix from rows, validating shape and values.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PlannerError::InvalidInput(format!(
                    "distance matrix must be square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(PlannerError::InvalidInput(format!(
                        "distance [{i}][{j}] must be finite and non-negative, got {d}"
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "distance [{i}][{i}] must be zero, got {}",
                    row[i]
                )));
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (rows[i][j] - rows[j][i]).abs() > SYMMETRY_TOLERANCE {
                    return Err(PlannerError::InvalidInput(format!(
                        "distance matrix must be symmetric: [{i}][{j}] = {} but [{j}][{i}] = {}",
                        rows[i][j], rows[j][i]
                    )));
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of locations covered by the matrix.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance between `i` and `j`, or `None` if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Row view of the matrix.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// A closed visiting order: a permutation of all location indices.
///
/// The last element connects back to the first. Equality is positional,
/// so rotations and reflections of the same cycle are distinct tours.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour(Vec<usize>);

impl Tour {
    /// Identity tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Uniformly shuffled tour over `n` locations.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        Self(order)
    }

    /// Copy of this tour with positions `i` and `j` exchanged.
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut order = self.0.clone();
        order.swap(i, j);
        Self(order)
    }

    /// Checks that the tour is a permutation of `0..n`.
    pub fn validate(&self, n: usize) -> Result<()> {
        if self.0.len() != n {
            return Err(PlannerError::InvalidInput(format!(
                "tour visits {} locations, expected {n}",
                self.0.len()
            )));
        }
        let mut seen = vec![false; n];
        for &idx in &self.0 {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(PlannerError::InvalidInput(format!(
                        "tour visits location {idx} more than once"
                    )))
                }
                None => {
                    return Err(PlannerError::InvalidInput(format!(
                        "tour references unknown location {idx}"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Location indices in visiting order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consumes the tour, returning the underlying order.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Tour {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self(order)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

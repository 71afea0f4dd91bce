//! Pairwise-swap neighborhood.

use crate::problem::Tour;

/// A candidate tour together with the positions swapped to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapMove {
    /// Lower swapped position.
    pub i: usize,
    /// Upper swapped position.
    pub j: usize,
    /// The resulting tour.
    pub tour: Tour,
}

/// All single-swap moves from `tour`, ordered lexicographically by `(i, j)`.
pub fn swap_moves(tour: &Tour) -> Vec<SwapMove> {
    let n = tour.len();
    let mut moves = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            moves.push(SwapMove {
                i,
                j,
                tour: tour.swapped(i, j),
            });
        }
    }
    moves
}

/// All tours one position swap away from `tour`.
///
/// Returns exactly `n * (n - 1) / 2` tours in `(i, j)` lexicographic order.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::Tour;
/// use u_tourtabu::tabu::neighbors;
///
/// let next = neighbors(&Tour::identity(3));
/// assert_eq!(next.len(), 3);
/// assert_eq!(next[0].as_slice(), &[1, 0, 2]);
/// ```
pub fn neighbors(tour: &Tour) -> Vec<Tour> {
    swap_moves(tour).into_iter().map(|m| m.tour).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_order_is_lexicographic() {
        let moves = swap_moves(&Tour::identity(4));
        let pairs: Vec<(usize, usize)> = moves.iter().map(|m| (m.i, m.j)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(moves[2].tour.as_slice(), &[3, 1, 2, 0]);
    }

    #[test]
    fn test_small_tours() {
        assert!(neighbors(&Tour::identity(0)).is_empty());
        assert!(neighbors(&Tour::identity(1)).is_empty());
        assert_eq!(neighbors(&Tour::identity(2)).len(), 1);
    }

    proptest! {
        #[test]
        fn prop_neighbors_are_distinct_permutations(
            order in (2usize..9).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        ) {
            let n = order.len();
            let tour = Tour::from(order);
            let next = neighbors(&tour);
            prop_assert_eq!(next.len(), n * (n - 1) / 2);

            let unique: HashSet<&Tour> = next.iter().collect();
            prop_assert_eq!(unique.len(), next.len());
            for t in &next {
                prop_assert!(t.validate(n).is_ok());
                prop_assert_ne!(t, &tour);
            }
        }
    }
}

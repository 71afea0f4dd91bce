//! Bounded FIFO tabu memory.

use std::collections::VecDeque;

use crate::problem::Tour;

/// Recently adopted tours, oldest first.
///
/// Holds at most `capacity` tours; recording one more evicts the oldest.
/// Membership uses positional tour equality.
///
/// # Examples
///
/// ```
/// use u_tourtabu::problem::Tour;
/// use u_tourtabu::tabu::TabuMemory;
///
/// let mut memory = TabuMemory::new(1);
/// memory.record(Tour::from(vec![0, 1, 2]));
/// memory.record(Tour::from(vec![1, 0, 2]));
/// assert!(!memory.contains(&Tour::from(vec![0, 1, 2])));
/// assert_eq!(memory.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TabuMemory {
    entries: VecDeque<Tour>,
    capacity: usize,
}

impl TabuMemory {
    /// Creates an empty memory holding at most `capacity` tours.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Returns `true` if an identical tour was recorded and not yet evicted.
    pub fn contains(&self, tour: &Tour) -> bool {
        self.entries.contains(tour)
    }

    /// Appends `tour`, evicting the oldest entries beyond capacity.
    pub fn record(&mut self, tour: Tour) {
        self.entries.push_back(tour);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recorded tours, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Tour> {
        self.entries.iter()
    }
}

//! Bounded position log used to draw the flight path.
//!
//! The log always holds exactly `capacity + 1` samples. Pushing a sample
//! evicts the oldest one, so a renderer iterating oldest to newest sees the
//! same continuous line it would get from shifting every entry down by one:
//!
//! ```text
//! before push(p):  [s0, s1, s2, ..., sN]
//! after  push(p):  [s1, s2, ..., sN, p ]
//! ```
//!
//! Internally this is a ring buffer with a start index, so a push is O(1).

use crate::types::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryHistory {
    samples: Vec<Vec3>,
    /// Index of the oldest sample
    start: usize,
}

impl TrajectoryHistory {
    /// Create a log of `capacity + 1` samples, all equal to `fill`.
    pub fn new(capacity: usize, fill: Vec3) -> Self {
        Self {
            samples: vec![fill; capacity + 1],
            start: 0,
        }
    }

    /// Number of samples retained, always `capacity + 1`.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true: the log holds at least one sample.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The `N` in "N+1 samples".
    pub fn capacity(&self) -> usize {
        self.samples.len() - 1
    }

    /// Overwrite every sample with `fill`.
    pub fn reset(&mut self, fill: Vec3) {
        self.samples.fill(fill);
        self.start = 0;
    }

    /// Drop the oldest sample and append `position` as the newest.
    pub fn push(&mut self, position: Vec3) {
        self.samples[self.start] = position;
        self.start = (self.start + 1) % self.samples.len();
    }

    pub fn oldest(&self) -> Vec3 {
        self.samples[self.start]
    }

    pub fn newest(&self) -> Vec3 {
        let last = (self.start + self.samples.len() - 1) % self.samples.len();
        self.samples[last]
    }

    /// Sample `index`, counted from the oldest.
    pub fn get(&self, index: usize) -> Option<Vec3> {
        if index >= self.samples.len() {
            return None;
        }
        Some(self.samples[(self.start + index) % self.samples.len()])
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Vec3> + '_ {
        let (newer, older) = self.samples.split_at(self.start);
        older.iter().chain(newer.iter())
    }

    /// Ordered copy, oldest first.
    pub fn to_vec(&self) -> Vec<Vec3> {
        self.iter().copied().collect()
    }
}

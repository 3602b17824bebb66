//! Interval indices for coordinate overlap queries.
//!
//! [`IntervalIndex`] is the capability the gene index relies on: insert an
//! interval, find the intervals covering a point, and find the intervals
//! overlapping a range. Two implementations are provided:
//!
//! - [`IntervalTree`]: augmented implicit BST, O(log n + k) queries
//! - [`SortedIntervals`]: sorted list with a linear scan, for small inputs
//!   and as a reference implementation in tests
//!
//! Intervals are half-open, `[begin, end)`. An interval overlaps the range
//! `[start, end)` when `interval.begin < end && interval.end > start`.
//!
//! # Example
//!
//! ```
//! use ferro_ann::interval::{Interval, IntervalIndex, IntervalTree};
//!
//! let tree: IntervalTree<&str> = vec![
//!     Interval::new(10, 20, "a"),
//!     Interval::new(15, 25, "b"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let hits: Vec<_> = tree.overlapping(19).into_iter().map(|iv| iv.data).collect();
//! assert_eq!(hits, vec!["a", "b"]);
//! assert!(tree.overlapping(25).is_empty());
//! ```

pub mod sorted;
pub mod tree;

pub use sorted::SortedIntervals;
pub use tree::IntervalTree;

/// A half-open interval `[begin, end)` with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<T> {
    /// First covered coordinate.
    pub begin: u64,
    /// One past the last covered coordinate.
    pub end: u64,
    /// Payload associated with this interval.
    pub data: T,
}

impl<T> Interval<T> {
    /// Create a new interval.
    pub fn new(begin: u64, end: u64, data: T) -> Self {
        Self { begin, end, data }
    }

    /// Length of the interval.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.begin)
    }

    /// Whether the interval covers no coordinates.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// Whether `position` lies inside the interval.
    pub fn contains(&self, position: u64) -> bool {
        self.begin <= position && position < self.end
    }

    /// Whether the interval overlaps `[start, end)`.
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        self.begin < end && self.end > start
    }

    /// Sort key used by every index: `(begin, end)`.
    pub fn bounds(&self) -> (u64, u64) {
        (self.begin, self.end)
    }
}

/// Point and range overlap queries over a set of intervals.
///
/// Results are returned ordered by `(begin, end)`. Overlapping intervals
/// are kept as separate entries; nothing is merged or deduplicated.
pub trait IntervalIndex<T> {
    /// Add an interval.
    fn insert(&mut self, interval: Interval<T>);

    /// All intervals overlapping `[start, end)`.
    fn overlapping_range(&self, start: u64, end: u64) -> Vec<&Interval<T>>;

    /// All intervals containing `position`.
    fn overlapping(&self, position: u64) -> Vec<&Interval<T>> {
        self.overlapping_range(position, position.saturating_add(1))
    }

    /// Whether any interval contains `position`.
    fn overlaps_point(&self, position: u64) -> bool {
        !self.overlapping(position).is_empty()
    }

    /// Number of intervals.
    fn len(&self) -> usize;

    /// Whether the index holds no intervals.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

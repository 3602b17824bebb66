//! Sorted-list interval index.

use super::{Interval, IntervalIndex};

/// Intervals sorted by `(begin, end)`, queried by scanning every interval
/// that begins before the query end.
///
/// Queries are O(log n + m) where m is the number of intervals starting
/// before the query end, which degrades to O(n) for positions near the end
/// of the genome. Fine for a few thousand genes.
#[derive(Debug, Clone)]
pub struct SortedIntervals<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for SortedIntervals<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }
}

impl<T> SortedIntervals<T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over all intervals in `(begin, end)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.intervals.iter()
    }
}

impl<T> IntervalIndex<T> for SortedIntervals<T> {
    fn insert(&mut self, interval: Interval<T>) {
        let key = interval.bounds();
        let at = self.intervals.partition_point(|iv| iv.bounds() <= key);
        self.intervals.insert(at, interval);
    }

    fn overlapping_range(&self, start: u64, end: u64) -> Vec<&Interval<T>> {
        if start >= end {
            return Vec::new();
        }
        let candidates = self.intervals.partition_point(|iv| iv.begin < end);
        self.intervals[..candidates]
            .iter()
            .filter(|iv| iv.end > start)
            .collect()
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }
}

impl<T> FromIterator<Interval<T>> for SortedIntervals<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut intervals: Vec<Interval<T>> = iter.into_iter().collect();
        intervals.sort_by_key(Interval::bounds);
        Self { intervals }
    }
}

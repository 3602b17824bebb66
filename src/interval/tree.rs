//! Augmented interval tree for fast overlap queries.
//!
//! Intervals are kept in a `Vec` sorted by `(begin, end)` and viewed as an
//! implicit balanced BST: the root of the range `[lo, hi)` is its midpoint.
//! `max_end[i]` holds the largest `end` in the subtree rooted at `i`, which
//! lets queries skip whole subtrees that finish before the query starts.

use super::{Interval, IntervalIndex};

/// A static-layout augmented interval tree.
///
/// Bulk construction via [`IntervalTree::from_unsorted`] or `collect()` is
/// O(n log n). [`IntervalIndex::insert`] keeps the tree valid but costs
/// O(n), so prefer bulk construction for large inputs.
#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    intervals: Vec<Interval<T>>,
    max_end: Vec<u64>,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
            max_end: Vec::new(),
        }
    }
}

impl<T> IntervalTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an interval tree from unsorted intervals.
    pub fn from_unsorted(mut intervals: Vec<Interval<T>>) -> Self {
        intervals.sort_by_key(Interval::bounds);
        let mut tree = Self {
            max_end: vec![0; intervals.len()],
            intervals,
        };
        tree.reindex();
        tree
    }

    /// Iterate over all intervals in `(begin, end)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<T>> {
        self.intervals.iter()
    }

    fn reindex(&mut self) {
        self.max_end.resize(self.intervals.len(), 0);
        augment_max_end(&self.intervals, &mut self.max_end, 0, self.intervals.len());
    }

    fn query_recursive<'a>(
        &'a self,
        lo: usize,
        hi: usize,
        start: u64,
        end: u64,
        results: &mut Vec<&'a Interval<T>>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;

        // Nothing in this subtree reaches the query start
        if self.max_end[mid] <= start {
            return;
        }

        self.query_recursive(lo, mid, start, end, results);

        let node = &self.intervals[mid];
        if node.overlaps(start, end) {
            results.push(node);
        }

        // Right subtree only holds larger begins
        if node.begin < end {
            self.query_recursive(mid + 1, hi, start, end, results);
        }
    }
}

/// Post-order pass computing subtree maxima. Returns the max for `[lo, hi)`.
fn augment_max_end<T>(intervals: &[Interval<T>], max_end: &mut [u64], lo: usize, hi: usize) -> u64 {
    if lo >= hi {
        return 0;
    }
    let mid = lo + (hi - lo) / 2;
    let left_max = augment_max_end(intervals, max_end, lo, mid);
    let right_max = augment_max_end(intervals, max_end, mid + 1, hi);
    let subtree_max = intervals[mid].end.max(left_max).max(right_max);
    max_end[mid] = subtree_max;
    subtree_max
}

impl<T> IntervalIndex<T> for IntervalTree<T> {
    fn insert(&mut self, interval: Interval<T>) {
        let key = interval.bounds();
        let at = self.intervals.partition_point(|iv| iv.bounds() <= key);
        self.intervals.insert(at, interval);
        self.reindex();
    }

    fn overlapping_range(&self, start: u64, end: u64) -> Vec<&Interval<T>> {
        let mut results = Vec::new();
        if start < end {
            self.query_recursive(0, self.intervals.len(), start, end, &mut results);
        }
        results
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }
}

impl<T> FromIterator<Interval<T>> for IntervalTree<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

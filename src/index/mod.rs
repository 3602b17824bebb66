//! Strand-specific gene indices.
//!
//! Gene records are split by strand and converted to 1-based index bounds
//! `[min + 1, max + 1)`. Each strand gets its own [`IntervalIndex`]; genes
//! that overlap are kept as separate intervals.
//!
//! # Example
//!
//! ```
//! use ferro_ann::gene::{GeneFeatureRecord, Strand};
//! use ferro_ann::index::GeneIndex;
//!
//! let genes = vec![
//!     GeneFeatureRecord::new("Rv0001", "dnaA", 0, 1524, 1, "ATG"),
//!     GeneFeatureRecord::new("Rv0002", "dnaN", 2051, 3260, 1, "ATG"),
//! ];
//! let index: GeneIndex = GeneIndex::build(genes).unwrap();
//!
//! let hits = index.overlapping(Strand::Plus, 1);
//! assert_eq!(hits[0].data.unique_id, "Rv0001");
//! assert!(index.overlapping(Strand::Plus, 1525).is_empty());
//! ```

use log::debug;

use crate::error::AnnError;
use crate::gene::{GeneFeatureRecord, GeneInfo, Strand};
use crate::interval::{Interval, IntervalIndex, IntervalTree};

/// An indexed gene: 1-based `[begin, end)` plus its payload.
pub type GeneInterval = Interval<GeneInfo>;

/// Convert one record into its strand and index interval.
pub fn index_interval(record: GeneFeatureRecord) -> Result<(Strand, GeneInterval), AnnError> {
    if record.end <= record.start {
        return Err(AnnError::invalid_feature(
            &record.unique_id,
            format!("empty span [{}, {})", record.start, record.end),
        ));
    }
    let (begin, end) = record.index_bounds().ok_or_else(|| {
        AnnError::invalid_feature(
            &record.unique_id,
            format!("span [{}, {}) exceeds the coordinate range", record.start, record.end),
        )
    })?;
    let (strand, info) = record.into_gene_info()?;
    Ok((strand, Interval::new(begin.value(), end, info)))
}

/// Build plus- and minus-strand indices from gene records.
///
/// Fails on the first record with a missing or unknown strand, or an empty
/// span; no partial index is returned.
pub fn build_indices<I>(
    features: impl IntoIterator<Item = GeneFeatureRecord>,
) -> Result<(I, I), AnnError>
where
    I: IntervalIndex<GeneInfo> + FromIterator<GeneInterval>,
{
    let mut plus = Vec::new();
    let mut minus = Vec::new();
    for record in features {
        match index_interval(record)? {
            (Strand::Plus, interval) => plus.push(interval),
            (Strand::Minus, interval) => minus.push(interval),
        }
    }
    debug!(
        "Indexed {} plus-strand and {} minus-strand genes",
        plus.len(),
        minus.len()
    );
    Ok((plus.into_iter().collect(), minus.into_iter().collect()))
}

/// Gene intervals for both strands.
///
/// Immutable once built, so it can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct GeneIndex<I = IntervalTree<GeneInfo>> {
    plus: I,
    minus: I,
}

impl<I> GeneIndex<I>
where
    I: IntervalIndex<GeneInfo> + FromIterator<GeneInterval>,
{
    /// Build the index from gene records.
    pub fn build(features: impl IntoIterator<Item = GeneFeatureRecord>) -> Result<Self, AnnError> {
        let (plus, minus) = build_indices(features)?;
        Ok(Self { plus, minus })
    }
}

impl<I> GeneIndex<I>
where
    I: IntervalIndex<GeneInfo>,
{
    /// Wrap already-built strand indices.
    pub fn from_parts(plus: I, minus: I) -> Self {
        Self { plus, minus }
    }

    /// The index for one strand.
    pub fn strand_index(&self, strand: Strand) -> &I {
        match strand {
            Strand::Plus => &self.plus,
            Strand::Minus => &self.minus,
        }
    }

    /// Genes on `strand` containing the 1-based `position`.
    pub fn overlapping(&self, strand: Strand, position: u64) -> Vec<&GeneInterval> {
        self.strand_index(strand).overlapping(position)
    }

    /// Genes on `strand` overlapping `[start, end)`.
    pub fn overlapping_range(&self, strand: Strand, start: u64, end: u64) -> Vec<&GeneInterval> {
        self.strand_index(strand).overlapping_range(start, end)
    }

    /// The nearest gene on `strand` whose start lies downstream of
    /// `position` within `window` bases, i.e. the gene `position` is
    /// upstream of.
    ///
    /// Plus strand: the first gene (by `(begin, end)`) overlapping
    /// `[position, position + window)` that begins after `position`.
    /// Minus strand: the last gene, by `(begin, end)`, overlapping
    /// `[position - window, position)` that ends at or before `position`.
    /// Genes containing `position` are never returned.
    ///
    /// The minus-strand pick is the gene with the greatest `begin`, not
    /// the greatest `end`: a short gene nested inside a longer one wins
    /// even when the longer gene's start codon is closer to `position`.
    pub fn nearest_upstream(
        &self,
        strand: Strand,
        position: u64,
        window: u64,
    ) -> Option<&GeneInterval> {
        let found = match strand {
            Strand::Plus => self
                .overlapping_range(strand, position, position.saturating_add(window))
                .into_iter()
                .find(|gene| gene.begin > position),
            Strand::Minus => self
                .overlapping_range(strand, position.saturating_sub(window), position)
                .into_iter()
                .filter(|gene| gene.end <= position)
                .last(),
        };
        debug!(
            "Upstream search at {} on {} strand: {}",
            position,
            strand,
            found.map_or("none", |gene| gene.data.unique_id.as_str())
        );
        found
    }

    /// Number of genes on one strand.
    pub fn strand_len(&self, strand: Strand) -> usize {
        self.strand_index(strand).len()
    }

    /// Total number of indexed genes.
    pub fn len(&self) -> usize {
        self.plus.len() + self.minus.len()
    }

    /// Whether no genes are indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Parallel processing support for ferro-ann
//!
//! This module annotates batches of variants using rayon. Enable with the
//! `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_ann::annotate::{Annotator, Variant};
//! use ferro_ann::config::AnnotatorConfig;
//! use ferro_ann::gene::load_gene_records;
//! use ferro_ann::index::GeneIndex;
//! use ferro_ann::parallel::annotate_parallel;
//!
//! let records = load_gene_records("genes.json.gz".as_ref()).unwrap();
//! let index: GeneIndex = GeneIndex::build(records).unwrap();
//! let annotator = Annotator::new(index, AnnotatorConfig::default());
//!
//! let variants = vec![Variant::parse(2509490, "T", "C").unwrap()];
//! let annotations = annotate_parallel(&annotator, &variants);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::annotate::{Annotation, Annotator, Variant};
use crate::error::AnnError;
use crate::gene::GeneInfo;
use crate::interval::IntervalIndex;

/// Annotate multiple variants in parallel
///
/// Returns a vector of results, one for each input variant.
/// Order is preserved.
pub fn annotate_parallel<I>(
    annotator: &Annotator<I>,
    variants: &[Variant],
) -> Vec<Result<Option<Annotation>, AnnError>>
where
    I: IntervalIndex<GeneInfo> + Sync,
{
    variants.par_iter().map(|v| annotator.annotate(v)).collect()
}

/// Annotate multiple variants in parallel, keeping only annotated ones
///
/// Intergenic variants and failures are dropped.
pub fn annotate_parallel_ok<I>(annotator: &Annotator<I>, variants: &[Variant]) -> Vec<Annotation>
where
    I: IntervalIndex<GeneInfo> + Sync,
{
    variants
        .par_iter()
        .filter_map(|v| annotator.annotate(v).ok().flatten())
        .collect()
}

/// Statistics from parallel processing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelStats {
    /// Total items processed
    pub total: usize,
    /// Variants that received an annotation
    pub annotated: usize,
    /// Variants with no nearby gene
    pub intergenic: usize,
    /// Failed to process
    pub errors: usize,
}

impl ParallelStats {
    /// Tally the output of [`annotate_parallel`].
    pub fn from_results(results: &[Result<Option<Annotation>, AnnError>]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(Some(_)) => stats.annotated += 1,
                Ok(None) => stats.intergenic += 1,
                Err(_) => stats.errors += 1,
            }
        }
        stats
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            ((self.total - self.errors) as f64 / self.total as f64) * 100.0
        }
    }
}

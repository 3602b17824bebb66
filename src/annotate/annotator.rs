//! Matching variants to genes.

use log::debug;

use super::{compute_annotation, Annotation};
use crate::codon::Base;
use crate::config::AnnotatorConfig;
use crate::coords::transcript_offset;
use crate::error::AnnError;
use crate::gene::{GeneInfo, Strand};
use crate::index::{GeneIndex, GeneInterval};
use crate::interval::{IntervalIndex, IntervalTree};

/// A single-nucleotide variant on the forward strand of the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variant {
    /// 1-based genomic position
    pub position: u64,
    pub reference: Base,
    pub alternate: Base,
}

impl Variant {
    /// Create a variant.
    pub fn new(position: u64, reference: Base, alternate: Base) -> Self {
        Self {
            position,
            reference,
            alternate,
        }
    }

    /// Create a variant from allele strings, which must each be a single
    /// A, C, G or T (case-insensitive).
    ///
    /// ```
    /// use ferro_ann::annotate::Variant;
    /// use ferro_ann::codon::Base;
    ///
    /// let variant = Variant::parse(2509490, "T", "c").unwrap();
    /// assert_eq!(variant.alternate, Base::C);
    /// assert!(Variant::parse(2509490, "TA", "T").is_err());
    /// ```
    pub fn parse(position: u64, reference: &str, alternate: &str) -> Result<Self, AnnError> {
        let base = |allele: &str| {
            Base::from_allele(allele).ok_or_else(|| AnnError::InvalidAllele {
                allele: allele.to_string(),
            })
        };
        Ok(Self::new(position, base(reference)?, base(alternate)?))
    }

    /// Alleles as read on `strand`.
    pub fn oriented(&self, strand: Strand) -> (Base, Base) {
        match strand {
            Strand::Plus => (self.reference, self.alternate),
            Strand::Minus => (self.reference.complement(), self.alternate.complement()),
        }
    }
}

/// Annotates variants against a [`GeneIndex`].
///
/// A variant inside a gene is classified against the first gene found,
/// plus strand before minus strand. An intergenic variant is reported as
/// upstream of the closest gene starting within the configured window.
#[derive(Debug, Clone)]
pub struct Annotator<I = IntervalTree<GeneInfo>> {
    index: GeneIndex<I>,
    config: AnnotatorConfig,
}

impl<I> Annotator<I>
where
    I: IntervalIndex<GeneInfo>,
{
    /// Create an annotator.
    pub fn new(index: GeneIndex<I>, config: AnnotatorConfig) -> Self {
        Self { index, config }
    }

    /// The gene index.
    pub fn index(&self) -> &GeneIndex<I> {
        &self.index
    }

    /// The active configuration.
    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    /// Annotate a variant, returning `None` for intergenic variants with no
    /// gene starting within the upstream window.
    pub fn annotate(&self, variant: &Variant) -> Result<Option<Annotation>, AnnError> {
        for strand in Strand::BOTH {
            if let Some(gene) = self.index.overlapping(strand, variant.position).first() {
                return self.classify(gene, variant, strand, true).map(Some);
            }
        }

        match self.nearest_upstream(variant.position) {
            Some((strand, gene)) => self.classify(gene, variant, strand, false).map(Some),
            None => {
                debug!("No gene near position {}", variant.position);
                Ok(None)
            }
        }
    }

    /// Annotate a variant against every gene containing it, on both
    /// strands. Upstream genes are not considered.
    pub fn annotate_all(&self, variant: &Variant) -> Result<Vec<Annotation>, AnnError> {
        Strand::BOTH
            .into_iter()
            .flat_map(|strand| {
                self.index
                    .overlapping(strand, variant.position)
                    .into_iter()
                    .map(move |gene| (strand, gene))
            })
            .map(|(strand, gene)| self.classify(gene, variant, strand, true))
            .collect()
    }

    /// The closest gene, on either strand, that `position` lies upstream
    /// of. Ties go to the plus strand.
    fn nearest_upstream(&self, position: u64) -> Option<(Strand, &GeneInterval)> {
        let window = self.config.upstream_window;
        Strand::BOTH
            .into_iter()
            .filter_map(|strand| {
                self.index
                    .nearest_upstream(strand, position, window)
                    .map(|gene| (strand, gene))
            })
            .min_by_key(|(strand, gene)| {
                transcript_offset(*strand, position, gene.begin, gene.end).unsigned_abs()
            })
    }

    fn classify(
        &self,
        gene: &GeneInterval,
        variant: &Variant,
        strand: Strand,
        in_gene: bool,
    ) -> Result<Annotation, AnnError> {
        let (reference, alternate) = if self.config.complement_minus_strand {
            variant.oriented(strand)
        } else {
            (variant.reference, variant.alternate)
        };
        let mut annotation =
            compute_annotation(gene, variant.position, reference, alternate, strand, in_gene)?;
        // The ANN allele must match the record's ALT, whatever the gene strand
        annotation.allele = variant.alternate;
        Ok(annotation)
    }
}

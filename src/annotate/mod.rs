//! SnpEff-style `ANN` annotations for single-nucleotide variants.
//!
//! [`compute_annotation`] classifies one variant against one indexed gene.
//! [`Annotator`] finds the gene to classify against.
//!
//! # Example
//!
//! ```
//! use ferro_ann::annotate::compute_annotation_string;
//! use ferro_ann::codon::Base;
//! use ferro_ann::gene::{GeneInfo, Strand};
//! use ferro_ann::interval::Interval;
//!
//! let gene = Interval::new(
//!     101,
//!     110,
//!     GeneInfo {
//!         unique_id: "Rv0001".to_string(),
//!         name: "dnaA".to_string(),
//!         residues: "ATGTTGTGA".to_string(),
//!     },
//! );
//!
//! let ann = compute_annotation_string(&gene, 102, Base::T, Base::C, Strand::Plus, true).unwrap();
//! assert_eq!(
//!     ann,
//!     "ANN=C|start_lost|HIGH|dnaA|Rv0001|transcript||Coding|1/1|c.2T>C|p.(Met1Thr)|2/9|2/9|1/3||"
//! );
//! ```

pub mod annotator;

pub use annotator::{Annotator, Variant};

use std::fmt;

use crate::codon::{Base, Codon};
use crate::coords::transcript_offset;
use crate::effect::{Effect, EffectPredictor, Impact};
use crate::error::AnnError;
use crate::gene::Strand;
use crate::index::GeneInterval;

/// Feature type column of every annotation.
pub const FEATURE_TYPE: &str = "transcript";
/// Transcript biotype column of every annotation.
pub const TRANSCRIPT_BIOTYPE: &str = "Coding";
/// Exon rank column; genes are single-exon.
pub const RANK: &str = "1/1";

/// One `ANN` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Alternate allele column. [`compute_annotation`] fills in the allele it
    /// was given; [`Annotator`] replaces it with the record's genomic ALT.
    pub allele: Base,
    pub effect: Effect,
    pub impact: Impact,
    pub gene_name: String,
    pub locus_id: String,
    /// HGVS-like `c.` change, e.g. `c.2T>C`
    pub dna_change: String,
    /// HGVS-like `p.` change, e.g. `p.(Met1Thr)`; empty upstream
    pub protein_change: String,
    /// `offset/gene_length`, used for both the cDNA and CDS columns
    pub gene_position: String,
    /// `codon/protein_length`
    pub protein_position: String,
    /// Distance to the gene start; empty inside a gene
    pub distance: String,
}

impl Annotation {
    /// The `|`-separated fields following `ANN=`.
    pub fn fields(&self) -> [String; 16] {
        [
            self.allele.to_string(),
            self.effect.so_term().to_string(),
            self.impact.as_str().to_string(),
            self.gene_name.clone(),
            self.locus_id.clone(),
            FEATURE_TYPE.to_string(),
            String::new(),
            TRANSCRIPT_BIOTYPE.to_string(),
            RANK.to_string(),
            self.dna_change.clone(),
            self.protein_change.clone(),
            self.gene_position.clone(),
            self.gene_position.clone(),
            self.protein_position.clone(),
            self.distance.clone(),
            String::new(),
        ]
    }

    /// Serialize as an `INFO` field value.
    pub fn to_ann_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ANN={}", self.fields().join("|"))
    }
}

/// Classify a variant at 1-based `position` against `interval`.
///
/// `reference` and `alternate` are read in the gene's transcript
/// orientation and are never complemented here. With `in_gene` set the
/// variant is classified as a coding change; otherwise it is reported as
/// an upstream variant with its distance to the gene start.
///
/// # Errors
///
/// - [`AnnError::PositionOutOfBounds`] if a coding position falls outside
///   the gene's residues
/// - [`AnnError::InvalidCodon`] if the affected codon is truncated or
///   contains a base other than A, C, G or T
/// - [`AnnError::CodonConflict`] / [`AnnError::UnknownEffect`] on internal
///   inconsistencies
pub fn compute_annotation(
    interval: &GeneInterval,
    position: u64,
    reference: Base,
    alternate: Base,
    strand: Strand,
    in_gene: bool,
) -> Result<Annotation, AnnError> {
    let offset = transcript_offset(strand, position, interval.begin, interval.end);
    let gene = &interval.data;

    if !in_gene {
        let effect = Effect::UpstreamGeneVariant;
        return Ok(Annotation {
            allele: alternate,
            effect,
            impact: effect.impact()?,
            gene_name: gene.name.clone(),
            locus_id: gene.unique_id.clone(),
            // Raw offset, not offset + 1
            dna_change: format!("c.{}{}>{}", offset, reference, alternate),
            protein_change: String::new(),
            gene_position: String::new(),
            protein_position: String::new(),
            distance: offset.unsigned_abs().to_string(),
        });
    }

    let residues = gene.residues.as_bytes();
    let index = usize::try_from(offset)
        .ok()
        .filter(|&i| i < residues.len())
        .ok_or(AnnError::PositionOutOfBounds {
            offset,
            length: residues.len(),
        })?;

    let gene_length = interval.len();
    let aa_index = index / 3;
    let codon_start = aa_index * 3;

    let ref_codon = residues
        .get(codon_start..codon_start + 3)
        .and_then(Codon::from_bytes)
        .ok_or_else(|| {
            let codon_end = residues.len().min(codon_start + 3);
            AnnError::InvalidCodon {
                codon: String::from_utf8_lossy(&residues[codon_start..codon_end]).into_owned(),
            }
        })?;
    let alt_codon = ref_codon.with_base(index - codon_start, alternate);

    let coding =
        EffectPredictor::new().classify_codon_change(&ref_codon, &alt_codon, codon_start)?;

    Ok(Annotation {
        allele: alternate,
        effect: coding.effect,
        impact: coding.impact,
        gene_name: gene.name.clone(),
        locus_id: gene.unique_id.clone(),
        dna_change: format!("c.{}{}>{}", index + 1, reference, alternate),
        protein_change: format!(
            "p.({}{}{})",
            coding.ref_aa,
            aa_index + 1,
            coding.alt_aa
        ),
        gene_position: format!("{}/{}", index + 1, gene_length),
        protein_position: format!("{}/{}", aa_index + 1, gene_length / 3),
        distance: String::new(),
    })
}

/// [`compute_annotation`] serialized as `ANN=...`.
pub fn compute_annotation_string(
    interval: &GeneInterval,
    position: u64,
    reference: Base,
    alternate: Base,
    strand: Strand,
    in_gene: bool,
) -> Result<String, AnnError> {
    compute_annotation(interval, position, reference, alternate, strand, in_gene)
        .map(|annotation| annotation.to_ann_string())
}

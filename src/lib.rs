// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-ann: SnpEff-style variant effect annotation for bacterial genomes
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! Gene records are indexed by strand, and single-nucleotide variants are
//! classified against the gene they fall in (or the gene they lie upstream
//! of) using the bacterial genetic code, producing a VCF `ANN` value.
//!
//! # Example
//!
//! ```
//! use ferro_ann::{Annotator, AnnotatorConfig, GeneFeatureRecord, GeneIndex, Variant};
//!
//! let genes = vec![GeneFeatureRecord::new("Rv0001", "dnaA", 100, 109, 1, "ATGTTGTGA")];
//! let index: GeneIndex = GeneIndex::build(genes).unwrap();
//! let annotator = Annotator::new(index, AnnotatorConfig::default());
//!
//! let variant = Variant::parse(107, "T", "A").unwrap();
//! let annotation = annotator.annotate(&variant).unwrap().unwrap();
//! assert_eq!(annotation.effect.so_term(), "stop_gained");
//! assert_eq!(annotation.protein_change, "p.(Leu2Ter)");
//! ```

pub mod annotate;
pub mod cli;
pub mod codon;
pub mod config;
pub mod coords;
pub mod effect;
pub mod error;
pub mod gene;
pub mod index;
pub mod interval;
#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export commonly used types
pub use annotate::{compute_annotation, compute_annotation_string, Annotation, Annotator, Variant};
pub use codon::{AminoAcid, Base, Codon, CodonTable};
pub use config::AnnotatorConfig;
pub use effect::{Effect, EffectPredictor, Impact};
pub use error::{AnnError, ErrorCode};
pub use gene::{load_gene_records, GeneFeatureRecord, GeneInfo, Strand};
pub use index::{build_indices, GeneIndex, GeneInterval};
pub use interval::{Interval, IntervalIndex, IntervalTree, SortedIntervals};

// Re-export coordinate types for type-safe position handling
pub use coords::{gene_span_to_index, transcript_offset, OneBasedPos, ZeroBasedPos};

/// Result type alias for ferro-ann operations
pub type Result<T> = std::result::Result<T, AnnError>;

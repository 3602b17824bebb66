//! Shared fixture genome for integration tests
//!
//! A small slice of the H37Rv annotation around Rv2237, with residues
//! chosen so that each classifier branch is reachable.

#![allow(dead_code)]

use ferro_ann::{AnnotatorConfig, Annotator, GeneFeatureRecord, GeneIndex, GeneInterval, Strand};

/// Rv2237, plus strand, 768 nt: `ATG AAA TTG (GCT)x252 TGA`
pub fn rv2237() -> GeneFeatureRecord {
    let residues = format!("ATGAAATTG{}TGA", "GCT".repeat(252));
    GeneFeatureRecord::new("Rv2237", "Rv2237", 2509488, 2510256, 1, residues)
}

/// Rv2237A, minus strand, 237 nt: `GTG (GCT)x77 TAG`
pub fn rv2237a() -> GeneFeatureRecord {
    let residues = format!("GTG{}TAG", "GCT".repeat(77));
    GeneFeatureRecord::new("Rv2237A", "", 2510350, 2510587, -1, residues)
}

/// Rv2226, plus strand, 300 nt, starting at 1-based 2498832
pub fn rv2226() -> GeneFeatureRecord {
    let residues = format!("ATG{}TAA", "GCT".repeat(98));
    GeneFeatureRecord::new("Rv2226", "Rv2226", 2498831, 2499131, 1, residues)
}

pub fn fixture_genes() -> Vec<GeneFeatureRecord> {
    vec![rv2226(), rv2237(), rv2237a()]
}

pub fn fixture_index() -> GeneIndex {
    GeneIndex::build(fixture_genes()).expect("fixture genes are valid")
}

pub fn fixture_annotator() -> Annotator {
    Annotator::new(fixture_index(), AnnotatorConfig::default())
}

/// The first gene on `strand` containing `position`.
pub fn gene_at(index: &GeneIndex, strand: Strand, position: u64) -> GeneInterval {
    index
        .overlapping(strand, position)
        .first()
        .map(|gene| (*gene).clone())
        .unwrap_or_else(|| panic!("no {} strand gene at {}", strand, position))
}

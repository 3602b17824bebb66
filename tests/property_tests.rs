//! Property-based tests for the gene index and effect classifier
//!
//! This module uses proptest to check coordinate conversion, interval
//! boundaries, backend agreement and classifier totality.

use ferro_ann::effect::{select_effect, CodonClass};
use ferro_ann::{
    build_indices, compute_annotation, AnnError, Base, Codon, Effect, EffectPredictor,
    GeneFeatureRecord, GeneIndex, GeneInfo, Interval, IntervalIndex, IntervalTree, SortedIntervals,
    Strand,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

fn base() -> impl Strategy<Value = Base> {
    prop_oneof![Just(Base::A), Just(Base::C), Just(Base::G), Just(Base::T)]
}

fn strand() -> impl Strategy<Value = Strand> {
    prop_oneof![Just(Strand::Plus), Just(Strand::Minus)]
}

fn codon() -> impl Strategy<Value = Codon> {
    (base(), base(), base()).prop_map(|(a, b, c)| Codon::new(a, b, c))
}

/// A non-empty 0-based gene span `(min, max)`
fn gene_span() -> impl Strategy<Value = (u64, u64)> {
    (0..5_000_000u64, 1..20_000u64).prop_map(|(min, len)| (min, min + len))
}

fn residues(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(base(), len)
        .prop_map(|bases| bases.iter().map(|b| b.to_char()).collect())
}

fn intervals() -> impl Strategy<Value = Vec<Interval<usize>>> {
    proptest::collection::vec((0..2_000u64, 1..300u64), 0..60).prop_map(|spans| {
        spans
            .into_iter()
            .enumerate()
            .map(|(i, (begin, len))| Interval::new(begin, begin + len, i))
            .collect()
    })
}

/// Reference implementation of the effect precedence rules.
fn first_matching_rule(ref_class: CodonClass, alt_class: CodonClass, aa_changed: bool) -> Effect {
    let rules = [
        (ref_class.is_start && !alt_class.is_start, Effect::StartLost),
        (ref_class.is_stop && !alt_class.is_stop, Effect::StopLost),
        (!ref_class.is_stop && alt_class.is_stop, Effect::StopGained),
        (ref_class.is_start && alt_class.is_start, Effect::InitiatorCodonVariant),
        (ref_class.is_stop && alt_class.is_stop, Effect::StopRetainedVariant),
        (aa_changed, Effect::MissenseVariant),
        (true, Effect::CodingSequenceVariant),
    ];
    rules
        .into_iter()
        .find(|(matched, _)| *matched)
        .map(|(_, effect)| effect)
        .unwrap()
}

// =============================================================================
// Exhaustive checks
// =============================================================================

#[test]
fn test_impact_lookup_is_total() {
    for effect in Effect::ALL {
        assert!(effect.impact().is_ok(), "{} has no impact", effect);
    }
}

#[test]
fn test_precedence_exhaustive() {
    let predictor = EffectPredictor::new();
    let table = predictor.codon_table();
    for codon_start in [0usize, 3, 765] {
        for ref_codon in Codon::all() {
            for alt_codon in Codon::all() {
                let effect = predictor
                    .classify_codon_change(&ref_codon, &alt_codon, codon_start)
                    .unwrap();
                let ref_class = predictor.classify_codon(&ref_codon, codon_start).unwrap();
                let alt_class = predictor.classify_codon(&alt_codon, codon_start).unwrap();
                let aa_changed = table.translate(&ref_codon) != table.translate(&alt_codon);
                assert_eq!(
                    effect.effect,
                    first_matching_rule(ref_class, alt_class, aa_changed),
                    "{} -> {} at {}",
                    ref_codon,
                    alt_codon,
                    codon_start
                );
            }
        }
    }
}

#[test]
fn test_start_effects_only_in_first_codon() {
    let predictor = EffectPredictor::new();
    for ref_codon in Codon::all() {
        for alt_codon in Codon::all() {
            let effect = predictor
                .classify_codon_change(&ref_codon, &alt_codon, 3)
                .unwrap()
                .effect;
            assert_ne!(effect, Effect::StartLost);
            assert_ne!(effect, Effect::InitiatorCodonVariant);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Coordinates
    // -------------------------------------------------------------------------

    /// Index bounds are always the record span shifted by one
    #[test]
    fn test_index_bounds_shift_by_one((min, max) in gene_span(), s in strand()) {
        let record = GeneFeatureRecord::new("G", "", min, max, s.as_i64(), "");
        let (plus, minus): (IntervalTree<GeneInfo>, IntervalTree<GeneInfo>) =
            build_indices(vec![record]).unwrap();
        let tree = match s {
            Strand::Plus => plus,
            Strand::Minus => minus,
        };
        let gene = tree.iter().next().unwrap();
        prop_assert_eq!(gene.begin, min + 1);
        prop_assert_eq!(gene.end, max + 1);
    }

    /// Overlap queries are exact at both boundaries
    #[test]
    fn test_boundaries_exact((min, max) in gene_span(), s in strand(), frac in 0.0f64..1.0) {
        let record = GeneFeatureRecord::new("G", "", min, max, s.as_i64(), "");
        let index: GeneIndex = GeneIndex::build(vec![record]).unwrap();
        let (begin, end) = (min + 1, max + 1);
        let inside = begin + ((end - begin) as f64 * frac) as u64;

        prop_assert_eq!(index.overlapping(s, begin).len(), 1);
        prop_assert_eq!(index.overlapping(s, end - 1).len(), 1);
        prop_assert_eq!(index.overlapping(s, inside.min(end - 1)).len(), 1);
        prop_assert!(index.overlapping(s, begin - 1).is_empty());
        prop_assert!(index.overlapping(s, end).is_empty());
    }

    /// Minus-strand offsets count back from the last base
    #[test]
    fn test_offsets_mirror_between_strands((min, max) in gene_span(), k in 0u64..20_000) {
        let (begin, end) = (min + 1, max + 1);
        let k = k % (end - begin);
        let plus = ferro_ann::transcript_offset(Strand::Plus, begin + k, begin, end);
        let minus = ferro_ann::transcript_offset(Strand::Minus, end - 1 - k, begin, end);
        prop_assert_eq!(plus, k as i64);
        prop_assert_eq!(minus, k as i64);
    }

    // -------------------------------------------------------------------------
    // Interval backends
    // -------------------------------------------------------------------------

    /// The interval tree returns exactly what a linear scan returns, in the same order
    #[test]
    fn test_tree_matches_sorted(ivs in intervals(), start in 0..2_400u64, len in 1..400u64) {
        let tree: IntervalTree<usize> = ivs.clone().into_iter().collect();
        let sorted: SortedIntervals<usize> = ivs.into_iter().collect();

        let data = |hits: Vec<&Interval<usize>>| {
            hits.into_iter().map(|iv| iv.data).collect::<Vec<usize>>()
        };
        let a = data(tree.overlapping_range(start, start + len));
        let b = data(sorted.overlapping_range(start, start + len));
        prop_assert_eq!(a, b);

        let a = data(tree.overlapping(start));
        let b = data(sorted.overlapping(start));
        prop_assert_eq!(a, b);
    }

    /// Incremental inserts give the same answers as bulk construction
    #[test]
    fn test_insert_matches_bulk(ivs in intervals(), pos in 0..2_400u64) {
        let mut inserted = IntervalTree::new();
        for iv in ivs.clone() {
            inserted.insert(iv);
        }
        let bulk = IntervalTree::from_unsorted(ivs);
        let bounds = |hits: Vec<&Interval<usize>>| {
            hits.into_iter().map(Interval::bounds).collect::<Vec<(u64, u64)>>()
        };
        prop_assert_eq!(bounds(inserted.overlapping(pos)), bounds(bulk.overlapping(pos)));
        prop_assert_eq!(a, b);
    }

    // -------------------------------------------------------------------------
    // Classifier
    // -------------------------------------------------------------------------

    /// Precedence is a pure function of codon classes and amino acids
    #[test]
    fn test_precedence_deterministic(
        ref_codon in codon(),
        alt_codon in codon(),
        first in any::<bool>(),
    ) {
        let predictor = EffectPredictor::new();
        let codon_start = if first { 0 } else { 3 };
        let once = predictor.classify_codon_change(&ref_codon, &alt_codon, codon_start).unwrap();
        let twice = predictor.classify_codon_change(&ref_codon, &alt_codon, codon_start).unwrap();
        prop_assert_eq!(&once, &twice);

        let ref_class = predictor.classify_codon(&ref_codon, codon_start).unwrap();
        let alt_class = predictor.classify_codon(&alt_codon, codon_start).unwrap();
        prop_assert_eq!(once.effect, select_effect(ref_class, alt_class, once.ref_aa, once.alt_aa));
    }

    /// Every in-gene SNV in a well-formed gene gets an annotation with
    /// consistent position columns
    #[test]
    fn test_coding_annotation_total(
        codons in 2usize..40,
        seq in residues(120),
        s in strand(),
        k in 0usize..120,
        alt in base(),
    ) {
        let len = codons * 3;
        let residues = &seq[..len];
        let k = k % len;
        let gene = Interval::new(
            1_000,
            1_000 + len as u64,
            GeneInfo {
                unique_id: "G".to_string(),
                name: String::new(),
                residues: residues.to_string(),
            },
        );
        let position = match s {
            Strand::Plus => 1_000 + k as u64,
            Strand::Minus => 1_000 + (len - 1 - k) as u64,
        };
        let reference = Base::from_byte(residues.as_bytes()[k]).unwrap();

        let ann = compute_annotation(&gene, position, reference, alt, s, true).unwrap();
        prop_assert_eq!(ann.dna_change, format!("c.{}{}>{}", k + 1, reference, alt));
        prop_assert_eq!(ann.gene_position, format!("{}/{}", k + 1, len));
        prop_assert_eq!(ann.protein_position, format!("{}/{}", k / 3 + 1, len / 3));
        prop_assert!(ann.effect.impact().is_ok());
    }

    /// Upstream annotations report the raw offset and its magnitude
    #[test]
    fn test_upstream_distance(distance in 1u64..1_000, s in strand(), alt in base()) {
        let gene = Interval::new(
            10_000,
            10_009,
            GeneInfo {
                unique_id: "G".to_string(),
                name: String::new(),
                residues: "ATGGCTTGA".to_string(),
            },
        );
        let position = match s {
            Strand::Plus => 10_000 - distance,
            Strand::Minus => 10_008 + distance,
        };
        let ann = compute_annotation(&gene, position, Base::A, alt, s, false).unwrap();
        prop_assert_eq!(ann.effect, Effect::UpstreamGeneVariant);
        prop_assert_eq!(ann.distance, distance.to_string());
        prop_assert_eq!(ann.dna_change, format!("c.-{}A>{}", distance, alt));
    }

    /// Positions past the residues are reported, not panicked on
    #[test]
    fn test_out_of_range_is_error(past in 0u64..100, alt in base()) {
        let gene = Interval::new(
            100,
            109,
            GeneInfo {
                unique_id: "G".to_string(),
                name: String::new(),
                residues: "ATGGCTTGA".to_string(),
            },
        );
        let err = compute_annotation(&gene, 109 + past, Base::A, alt, Strand::Plus, true)
            .unwrap_err();
        let is_out_of_bounds = matches!(err, AnnError::PositionOutOfBounds { .. });
        prop_assert!(is_out_of_bounds);
    }
}

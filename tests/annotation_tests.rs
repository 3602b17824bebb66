//! Annotation scenarios on the fixture genome
//!
//! Classifier cases pass alleles in transcript orientation, as a caller
//! that has already oriented them would. Annotator cases pass genomic
//! alleles and let the driver orient them.

mod common;

use common::{fixture_annotator, fixture_index, gene_at};
use ferro_ann::{
    compute_annotation_string, AnnError, Annotator, AnnotatorConfig, Base, Effect, Strand, Variant,
};
use rstest::rstest;

fn base(allele: &str) -> Base {
    Base::from_allele(allele).unwrap()
}

fn assert_contains_all(ann: &str, expected: &[&str]) {
    for text in expected {
        assert!(ann.contains(text), "Expected {} in annotation string: {}", text, ann);
    }
}

// ============================================================================
// Classifier: coding branch
// ============================================================================

#[rstest]
#[case::start_lost(
    2509490,
    "T",
    "C",
    &["start_lost", "HIGH", "c.2T>C", "p.(Met1Thr)", "2/768", "1/256"]
)]
#[case::initiator_codon(
    2509489,
    "A",
    "G",
    &["initiator_codon_variant", "LOW", "c.1A>G", "p.(Met1Val)", "1/768", "1/256"]
)]
#[case::stop_gained(
    2509496,
    "T",
    "A",
    &["stop_gained", "HIGH", "c.8T>A", "p.(Leu3Ter)", "8/768", "3/256"]
)]
#[case::missense(
    2509496,
    "T",
    "G",
    &["missense_variant", "MODERATE", "c.8T>G", "p.(Leu3Trp)", "8/768", "3/256"]
)]
#[case::stop_lost(
    2510255,
    "G",
    "C",
    &["stop_lost", "HIGH", "c.767G>C", "p.(Ter256Ser)", "767/768", "256/256"]
)]
#[case::stop_retained(
    2510255,
    "G",
    "A",
    &["stop_retained_variant", "LOW", "c.767G>A", "p.(Ter256Ter)", "767/768", "256/256"]
)]
#[case::synonymous(
    2509500,
    "T",
    "C",
    &["coding_sequence_variant", "MODERATE", "c.12T>C", "p.(Ala4Ala)", "12/768", "4/256"]
)]
fn test_plus_strand_coding(
    #[case] position: u64,
    #[case] reference: &str,
    #[case] alternate: &str,
    #[case] expected: &[&str],
) {
    let index = fixture_index();
    let gene = gene_at(&index, Strand::Plus, position);
    let (reference, alternate) = (base(reference), base(alternate));
    let ann = compute_annotation_string(&gene, position, reference, alternate, Strand::Plus, true)
        .unwrap();
    assert_contains_all(&ann, expected);
    assert!(ann.contains("|Rv2237|Rv2237|transcript||Coding|1/1|"));
}

#[rstest]
#[case::stop_lost(
    2510351,
    "G",
    "C",
    &["stop_lost", "HIGH", "c.237G>C", "p.(Ter79Tyr)", "237/237", "79/79"]
)]
#[case::initiator_codon(
    2510587,
    "G",
    "A",
    &["initiator_codon_variant", "LOW", "c.1G>A", "p.(Val1Met)", "1/237", "1/79"]
)]
fn test_minus_strand_coding(
    #[case] position: u64,
    #[case] reference: &str,
    #[case] alternate: &str,
    #[case] expected: &[&str],
) {
    let index = fixture_index();
    let gene = gene_at(&index, Strand::Minus, position);
    let (reference, alternate) = (base(reference), base(alternate));
    let ann = compute_annotation_string(&gene, position, reference, alternate, Strand::Minus, true)
        .unwrap();
    assert_contains_all(&ann, expected);
    // Unnamed gene leaves the name column empty
    assert!(ann.contains("||Rv2237A|transcript|"));
}

#[test]
fn test_full_ann_string() {
    let index = fixture_index();
    let gene = gene_at(&index, Strand::Plus, 2509490);
    let ann =
        compute_annotation_string(&gene, 2509490, Base::T, Base::C, Strand::Plus, true).unwrap();
    assert_eq!(
        ann,
        "ANN=C|start_lost|HIGH|Rv2237|Rv2237|transcript||Coding|1/1|c.2T>C|p.(Met1Thr)|2/768|2/768|1/256||"
    );
}

// ============================================================================
// Classifier: upstream branch
// ============================================================================

#[test]
fn test_upstream_minus_strand() {
    let index = fixture_index();
    let position = 2510588;
    let gene = index
        .overlapping_range(Strand::Minus, position - 1000, position)
        .last()
        .map(|gene| (*gene).clone())
        .unwrap();
    let ann = compute_annotation_string(&gene, position, Base::T, Base::A, Strand::Minus, false)
        .unwrap();
    assert_contains_all(&ann, &["upstream_gene_variant", "MODIFIER", "Rv2237A", "c.-1T>A"]);
    assert!(ann.ends_with("|||||1|"));
}

#[test]
fn test_upstream_plus_strand() {
    let index = fixture_index();
    let position = 2498822;
    let gene = index
        .overlapping_range(Strand::Plus, position, position + 1000)
        .first()
        .map(|gene| (*gene).clone())
        .unwrap();
    let ann = compute_annotation_string(&gene, position, Base::C, Base::A, Strand::Plus, false)
        .unwrap();
    assert_contains_all(&ann, &["upstream_gene_variant", "MODIFIER", "Rv2226", "c.-10C>A"]);
    assert!(ann.ends_with("|10|"));
}

// ============================================================================
// Annotator driver
// ============================================================================

#[rstest]
#[case::plus_start_lost(2509490, "T", "C", "Rv2237", Effect::StartLost, "c.2T>C")]
#[case::plus_upstream(2498822, "C", "A", "Rv2226", Effect::UpstreamGeneVariant, "c.-10C>A")]
// Genomic C>G is transcript G>C on the minus strand
#[case::minus_stop_lost(2510351, "C", "G", "Rv2237A", Effect::StopLost, "c.237G>C")]
#[case::minus_upstream(2510588, "A", "T", "Rv2237A", Effect::UpstreamGeneVariant, "c.-1T>A")]
fn test_annotator(
    #[case] position: u64,
    #[case] reference: &str,
    #[case] alternate: &str,
    #[case] locus: &str,
    #[case] effect: Effect,
    #[case] dna_change: &str,
) {
    let variant = Variant::parse(position, reference, alternate).unwrap();
    let ann = fixture_annotator().annotate(&variant).unwrap().unwrap();
    assert_eq!(ann.locus_id, locus);
    assert_eq!(ann.effect, effect);
    assert_eq!(ann.dna_change, dna_change);
}

#[rstest]
#[case::minus_coding(2510351, Base::C, Base::G, "ANN=G|stop_lost|HIGH||Rv2237A|")]
#[case::minus_upstream(2510588, Base::A, Base::T, "ANN=T|upstream_gene_variant|MODIFIER||Rv2237A|")]
#[case::plus_coding(2509490, Base::T, Base::C, "ANN=C|start_lost|HIGH|Rv2237|Rv2237|")]
fn test_ann_allele_is_record_alt(
    #[case] position: u64,
    #[case] reference: Base,
    #[case] alternate: Base,
    #[case] prefix: &str,
) {
    let ann = fixture_annotator()
        .annotate(&Variant::new(position, reference, alternate))
        .unwrap()
        .unwrap();
    assert_eq!(ann.allele, alternate);
    assert!(ann.to_ann_string().starts_with(prefix), "{}", ann);
}

#[test]
fn test_annotator_without_complement_matches_classifier() {
    let config = AnnotatorConfig::default().with_complement_minus_strand(false);
    let annotator: Annotator = Annotator::new(fixture_index(), config);
    let ann = annotator
        .annotate(&Variant::new(2510351, Base::G, Base::C))
        .unwrap()
        .unwrap();
    assert_eq!(ann.protein_change, "p.(Ter79Tyr)");
}

#[rstest]
#[case::between_genes(2505000)]
#[case::far_downstream(2600000)]
#[case::genome_start(1)]
fn test_intergenic(#[case] position: u64) {
    let variant = Variant::new(position, Base::A, Base::G);
    assert_eq!(fixture_annotator().annotate(&variant).unwrap(), None);
}

#[test]
fn test_upstream_follows_transcription_direction() {
    // Past the end of Rv2237 and short of the 3' end of Rv2237A: neither
    // gene starts downstream of this position on its own strand
    let ann = fixture_annotator()
        .annotate(&Variant::new(2510300, Base::A, Base::G))
        .unwrap();
    assert!(ann.is_none());

    // Past Rv2237A's start the minus gene is 13 bp away
    let ann = fixture_annotator()
        .annotate(&Variant::new(2510600, Base::A, Base::G))
        .unwrap()
        .unwrap();
    assert_eq!(ann.locus_id, "Rv2237A");
    assert_eq!(ann.distance, "13");
}

#[test]
fn test_annotate_all_single_overlap() {
    let all = fixture_annotator()
        .annotate_all(&Variant::new(2509490, Base::T, Base::C))
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].effect, Effect::StartLost);
}

#[test]
fn test_invalid_allele_rejected() {
    assert!(matches!(
        Variant::parse(2509490, "N", "C"),
        Err(AnnError::InvalidAllele { .. })
    ));
}

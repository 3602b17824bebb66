//! Coding effect classification for single-nucleotide variants.
//!
//! This module turns a reference/alternate codon pair into a Sequence
//! Ontology effect term and a SnpEff impact bucket.
//!
//! # Example
//!
//! ```
//! use ferro_ann::codon::Codon;
//! use ferro_ann::effect::{Effect, EffectPredictor, Impact};
//!
//! let predictor = EffectPredictor::new();
//! let ref_codon = Codon::parse("TTG").unwrap();
//! let alt_codon = Codon::parse("TAG").unwrap();
//!
//! let effect = predictor.classify_codon_change(&ref_codon, &alt_codon, 6).unwrap();
//! assert_eq!(effect.effect, Effect::StopGained);
//! assert_eq!(effect.impact, Impact::High);
//! ```

use crate::codon::{AminoAcid, Codon, CodonTable, BACTERIAL_CODE};
use crate::error::AnnError;

/// Sequence Ontology effect term produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Effect {
    /// Start codon changed to a non-start codon.
    StartLost,
    /// Stop codon changed to an amino acid.
    StopLost,
    /// Introduces a premature stop codon.
    StopGained,
    /// Start codon changed to another start codon.
    InitiatorCodonVariant,
    /// Stop codon changed to another stop codon.
    StopRetainedVariant,
    /// Amino acid substitution.
    MissenseVariant,
    /// Codon change without an amino acid change.
    CodingSequenceVariant,
    /// Variant upstream of the gene start.
    UpstreamGeneVariant,
}

impl Effect {
    /// Every effect the classifier can produce.
    pub const ALL: [Effect; 8] = [
        Effect::StartLost,
        Effect::StopLost,
        Effect::StopGained,
        Effect::InitiatorCodonVariant,
        Effect::StopRetainedVariant,
        Effect::MissenseVariant,
        Effect::CodingSequenceVariant,
        Effect::UpstreamGeneVariant,
    ];

    /// Get the Sequence Ontology term.
    pub fn so_term(&self) -> &'static str {
        match self {
            Effect::StartLost => "start_lost",
            Effect::StopLost => "stop_lost",
            Effect::StopGained => "stop_gained",
            Effect::InitiatorCodonVariant => "initiator_codon_variant",
            Effect::StopRetainedVariant => "stop_retained_variant",
            Effect::MissenseVariant => "missense_variant",
            Effect::CodingSequenceVariant => "coding_sequence_variant",
            Effect::UpstreamGeneVariant => "upstream_gene_variant",
        }
    }

    /// Get the Sequence Ontology ID.
    pub fn so_id(&self) -> &'static str {
        match self {
            Effect::StartLost => "SO:0002012",
            Effect::StopLost => "SO:0001578",
            Effect::StopGained => "SO:0001587",
            Effect::InitiatorCodonVariant => "SO:0001582",
            Effect::StopRetainedVariant => "SO:0001567",
            Effect::MissenseVariant => "SO:0001583",
            Effect::CodingSequenceVariant => "SO:0001580",
            Effect::UpstreamGeneVariant => "SO:0001631",
        }
    }

    /// Look up the impact in [`EFFECT_IMPACT`].
    pub fn impact(&self) -> Result<Impact, AnnError> {
        impact_of(*self)
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.so_term())
    }
}

/// Variant impact level (SnpEff-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Impact {
    /// Modifier - minimal predicted impact.
    Modifier,
    /// Low impact.
    Low,
    /// Moderate impact.
    Moderate,
    /// High impact (likely deleterious).
    High,
}

impl Impact {
    /// Get the impact as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "HIGH",
            Impact::Moderate => "MODERATE",
            Impact::Low => "LOW",
            Impact::Modifier => "MODIFIER",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effect to impact lookup table.
///
/// `coding_sequence_variant` is MODERATE here, not MODIFIER as in VEP.
pub const EFFECT_IMPACT: &[(Effect, Impact)] = &[
    (Effect::StopLost, Impact::High),
    (Effect::StopGained, Impact::High),
    (Effect::StartLost, Impact::High),
    (Effect::MissenseVariant, Impact::Moderate),
    (Effect::CodingSequenceVariant, Impact::Moderate),
    (Effect::InitiatorCodonVariant, Impact::Low),
    (Effect::StopRetainedVariant, Impact::Low),
    (Effect::UpstreamGeneVariant, Impact::Modifier),
];

/// Look up the impact of an effect.
///
/// Fails with [`AnnError::UnknownEffect`] if the table has no entry.
pub fn impact_of(effect: Effect) -> Result<Impact, AnnError> {
    EFFECT_IMPACT
        .iter()
        .find(|(e, _)| *e == effect)
        .map(|(_, impact)| *impact)
        .ok_or_else(|| AnnError::UnknownEffect {
            effect: effect.so_term().to_string(),
        })
}

/// Start/stop status of a codon at a particular position in a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodonClass {
    /// Codon is a start codon and is the first codon of the gene.
    pub is_start: bool,
    /// Codon is a stop codon (anywhere in the gene).
    pub is_stop: bool,
}

/// Choose the effect of a codon change.
///
/// Rules are checked in order and the first match wins.
pub fn select_effect(
    ref_class: CodonClass,
    alt_class: CodonClass,
    ref_aa: AminoAcid,
    alt_aa: AminoAcid,
) -> Effect {
    // A start-like codon gained mid-gene is just another amino acid, so
    // there is no start_gained rule.
    if ref_class.is_start && !alt_class.is_start {
        Effect::StartLost
    } else if ref_class.is_stop && !alt_class.is_stop {
        Effect::StopLost
    } else if !ref_class.is_stop && alt_class.is_stop {
        Effect::StopGained
    } else if ref_class.is_start && alt_class.is_start {
        Effect::InitiatorCodonVariant
    } else if ref_class.is_stop && alt_class.is_stop {
        Effect::StopRetainedVariant
    } else if ref_aa != alt_aa {
        Effect::MissenseVariant
    } else {
        Effect::CodingSequenceVariant
    }
}

/// Classified codon change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodingEffect {
    /// Effect term.
    pub effect: Effect,
    /// Impact of `effect`.
    pub impact: Impact,
    /// Reference codon.
    pub ref_codon: Codon,
    /// Alternate codon.
    pub alt_codon: Codon,
    /// Reference amino acid.
    pub ref_aa: AminoAcid,
    /// Alternate amino acid.
    pub alt_aa: AminoAcid,
}

/// Codon change classifier bound to a codon table.
#[derive(Debug, Clone, Copy)]
pub struct EffectPredictor {
    codon_table: &'static CodonTable,
}

impl EffectPredictor {
    /// Create a predictor using the bacterial code.
    pub fn new() -> Self {
        Self {
            codon_table: &*BACTERIAL_CODE,
        }
    }

    /// Create a predictor using a specific table.
    pub fn with_table(codon_table: &'static CodonTable) -> Self {
        Self { codon_table }
    }

    /// Classify a codon as start and/or stop.
    ///
    /// Only the first codon of a gene (`codon_start == 0`) can be a start
    /// codon. A codon that comes out as both is an internal error.
    pub fn classify_codon(
        &self,
        codon: &Codon,
        codon_start: usize,
    ) -> Result<CodonClass, AnnError> {
        let class = CodonClass {
            is_start: codon_start == 0 && self.codon_table.is_start(codon),
            is_stop: self.codon_table.is_stop(codon),
        };
        if class.is_start && class.is_stop {
            return Err(AnnError::CodonConflict {
                codon: codon.to_string(),
                offset: codon_start,
            });
        }
        Ok(class)
    }

    /// Classify the change from `ref_codon` to `alt_codon`, where both
    /// begin at 0-based offset `codon_start` in the coding sequence.
    pub fn classify_codon_change(
        &self,
        ref_codon: &Codon,
        alt_codon: &Codon,
        codon_start: usize,
    ) -> Result<CodingEffect, AnnError> {
        let ref_class = self.classify_codon(ref_codon, codon_start)?;
        let alt_class = self.classify_codon(alt_codon, codon_start)?;
        let ref_aa = self.codon_table.translate(ref_codon);
        let alt_aa = self.codon_table.translate(alt_codon);

        let effect = select_effect(ref_class, alt_class, ref_aa, alt_aa);
        let impact = effect.impact()?;

        Ok(CodingEffect {
            effect,
            impact,
            ref_codon: *ref_codon,
            alt_codon: *alt_codon,
            ref_aa,
            alt_aa,
        })
    }

    /// Get the codon table.
    pub fn codon_table(&self) -> &CodonTable {
        self.codon_table
    }
}

impl Default for EffectPredictor {
    fn default() -> Self {
        Self::new()
    }
}

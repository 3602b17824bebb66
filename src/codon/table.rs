//! Bacterial genetic code (NCBI translation table 11).

use super::{AminoAcid, Codon};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Process-wide bacterial codon table, built on first use.
pub static BACTERIAL_CODE: Lazy<CodonTable> = Lazy::new(CodonTable::bacterial);

/// Genetic code table.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// Codon to amino acid mapping (stop codons map to `Ter`).
    codon_to_aa: HashMap<Codon, AminoAcid>,
    /// Stop codons.
    stop_codons: Vec<Codon>,
    /// Start codon(s).
    start_codons: Vec<Codon>,
}

impl CodonTable {
    /// Create the bacterial, archaeal and plant plastid code (table 11).
    ///
    /// The sense codons are those of the standard code; table 11 differs
    /// only in its alternative initiation codons.
    pub fn bacterial() -> Self {
        let code: &[(&str, Option<AminoAcid>)] = &[
            // Phenylalanine (Phe, F)
            ("TTT", Some(AminoAcid::Phe)),
            ("TTC", Some(AminoAcid::Phe)),
            // Leucine (Leu, L)
            ("TTA", Some(AminoAcid::Leu)),
            ("TTG", Some(AminoAcid::Leu)),
            ("CTT", Some(AminoAcid::Leu)),
            ("CTC", Some(AminoAcid::Leu)),
            ("CTA", Some(AminoAcid::Leu)),
            ("CTG", Some(AminoAcid::Leu)),
            // Isoleucine (Ile, I)
            ("ATT", Some(AminoAcid::Ile)),
            ("ATC", Some(AminoAcid::Ile)),
            ("ATA", Some(AminoAcid::Ile)),
            // Methionine (Met, M)
            ("ATG", Some(AminoAcid::Met)),
            // Valine (Val, V)
            ("GTT", Some(AminoAcid::Val)),
            ("GTC", Some(AminoAcid::Val)),
            ("GTA", Some(AminoAcid::Val)),
            ("GTG", Some(AminoAcid::Val)),
            // Serine (Ser, S)
            ("TCT", Some(AminoAcid::Ser)),
            ("TCC", Some(AminoAcid::Ser)),
            ("TCA", Some(AminoAcid::Ser)),
            ("TCG", Some(AminoAcid::Ser)),
            ("AGT", Some(AminoAcid::Ser)),
            ("AGC", Some(AminoAcid::Ser)),
            // Proline (Pro, P)
            ("CCT", Some(AminoAcid::Pro)),
            ("CCC", Some(AminoAcid::Pro)),
            ("CCA", Some(AminoAcid::Pro)),
            ("CCG", Some(AminoAcid::Pro)),
            // Threonine (Thr, T)
            ("ACT", Some(AminoAcid::Thr)),
            ("ACC", Some(AminoAcid::Thr)),
            ("ACA", Some(AminoAcid::Thr)),
            ("ACG", Some(AminoAcid::Thr)),
            // Alanine (Ala, A)
            ("GCT", Some(AminoAcid::Ala)),
            ("GCC", Some(AminoAcid::Ala)),
            ("GCA", Some(AminoAcid::Ala)),
            ("GCG", Some(AminoAcid::Ala)),
            // Tyrosine (Tyr, Y)
            ("TAT", Some(AminoAcid::Tyr)),
            ("TAC", Some(AminoAcid::Tyr)),
            // Stop codons
            ("TAA", None), // Ochre
            ("TAG", None), // Amber
            ("TGA", None), // Opal
            // Histidine (His, H)
            ("CAT", Some(AminoAcid::His)),
            ("CAC", Some(AminoAcid::His)),
            // Glutamine (Gln, Q)
            ("CAA", Some(AminoAcid::Gln)),
            ("CAG", Some(AminoAcid::Gln)),
            // Asparagine (Asn, N)
            ("AAT", Some(AminoAcid::Asn)),
            ("AAC", Some(AminoAcid::Asn)),
            // Lysine (Lys, K)
            ("AAA", Some(AminoAcid::Lys)),
            ("AAG", Some(AminoAcid::Lys)),
            // Aspartic acid (Asp, D)
            ("GAT", Some(AminoAcid::Asp)),
            ("GAC", Some(AminoAcid::Asp)),
            // Glutamic acid (Glu, E)
            ("GAA", Some(AminoAcid::Glu)),
            ("GAG", Some(AminoAcid::Glu)),
            // Cysteine (Cys, C)
            ("TGT", Some(AminoAcid::Cys)),
            ("TGC", Some(AminoAcid::Cys)),
            // Tryptophan (Trp, W)
            ("TGG", Some(AminoAcid::Trp)),
            // Arginine (Arg, R)
            ("CGT", Some(AminoAcid::Arg)),
            ("CGC", Some(AminoAcid::Arg)),
            ("CGA", Some(AminoAcid::Arg)),
            ("CGG", Some(AminoAcid::Arg)),
            ("AGA", Some(AminoAcid::Arg)),
            ("AGG", Some(AminoAcid::Arg)),
            // Glycine (Gly, G)
            ("GGT", Some(AminoAcid::Gly)),
            ("GGC", Some(AminoAcid::Gly)),
            ("GGA", Some(AminoAcid::Gly)),
            ("GGG", Some(AminoAcid::Gly)),
        ];

        let mut codon_to_aa = HashMap::with_capacity(code.len());
        let mut stop_codons = Vec::new();

        for (codon_str, aa_opt) in code {
            let Some(codon) = Codon::parse(codon_str) else {
                continue;
            };
            match aa_opt {
                Some(aa) => {
                    codon_to_aa.insert(codon, *aa);
                }
                None => {
                    codon_to_aa.insert(codon, AminoAcid::Ter);
                    stop_codons.push(codon);
                }
            }
        }

        let start_codons = ["TTG", "CTG", "ATT", "ATC", "ATA", "ATG", "GTG"]
            .iter()
            .filter_map(|s| Codon::parse(s))
            .collect();

        Self {
            codon_to_aa,
            stop_codons,
            start_codons,
        }
    }

    /// Build a table from an explicit mapping and start/stop codon sets.
    ///
    /// Stop codons missing from `codon_to_aa` translate to `Ter`.
    pub fn from_parts(
        codon_to_aa: HashMap<Codon, AminoAcid>,
        start_codons: Vec<Codon>,
        stop_codons: Vec<Codon>,
    ) -> Self {
        Self {
            codon_to_aa,
            stop_codons,
            start_codons,
        }
    }

    /// Get the amino acid encoded by a codon.
    pub fn amino_acid_for(&self, codon: &Codon) -> Option<&AminoAcid> {
        self.codon_to_aa.get(codon)
    }

    /// Translate a codon; stop codons translate to [`AminoAcid::Ter`].
    ///
    /// Every one of the 64 codons has an entry, so this is total.
    pub fn translate(&self, codon: &Codon) -> AminoAcid {
        self.codon_to_aa
            .get(codon)
            .copied()
            .unwrap_or(AminoAcid::Ter)
    }

    /// Check if a codon is a stop codon.
    pub fn is_stop(&self, codon: &Codon) -> bool {
        self.stop_codons.contains(codon)
    }

    /// Check if a codon is a start codon.
    ///
    /// This is a property of the codon alone; whether it actually initiates
    /// translation depends on its position in the gene.
    pub fn is_start(&self, codon: &Codon) -> bool {
        self.start_codons.contains(codon)
    }

    /// Get all stop codons.
    pub fn stop_codons(&self) -> &[Codon] {
        &self.stop_codons
    }

    /// Get all start codons.
    pub fn start_codons(&self) -> &[Codon] {
        &self.start_codons
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::bacterial()
    }
}

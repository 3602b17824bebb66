//! Gene feature records and strand handling.
//!
//! Gene records are supplied by an external gene database export as a JSON
//! array of objects with exactly the keys
//! `{uniquename, name, min, max, strand, residues}`, where `min`/`max` are
//! 0-based half-open coordinates and `residues` is the coding sequence read
//! 5'→3' in the direction of transcription.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::coords::{gene_span_to_index, OneBasedPos, ZeroBasedPos};
use crate::error::AnnError;

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// Both strands, plus first.
    pub const BOTH: [Strand; 2] = [Strand::Plus, Strand::Minus];

    /// Numeric form used by gene records (`1` or `-1`).
    pub fn as_i64(self) -> i64 {
        match self {
            Strand::Plus => 1,
            Strand::Minus => -1,
        }
    }
}

impl TryFrom<i64> for Strand {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Strand::Plus),
            -1 => Ok(Strand::Minus),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

/// A gene as supplied by the gene database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneFeatureRecord {
    /// Stable locus identifier, unique across the genome (e.g. `Rv2237`)
    #[serde(rename = "uniquename")]
    pub unique_id: String,
    /// Display gene name; may be empty and need not be unique
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// 0-based start
    #[serde(rename = "min")]
    pub start: u64,
    /// 0-based end (exclusive)
    #[serde(rename = "max")]
    pub end: u64,
    /// `1` or `-1`; validated when the gene index is built
    #[serde(default)]
    pub strand: Option<i64>,
    /// Coding sequence in transcription direction
    pub residues: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeneFeatureRecord {
    /// Create a record.
    pub fn new(
        unique_id: impl Into<String>,
        name: impl Into<String>,
        start: u64,
        end: u64,
        strand: i64,
        residues: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            start,
            end,
            strand: Some(strand),
            residues: residues.into(),
        }
    }

    /// The record's strand.
    ///
    /// A missing strand or one other than `1`/`-1` is an
    /// [`AnnError::InvalidFeature`].
    pub fn strand(&self) -> Result<Strand, AnnError> {
        let raw = self.strand.ok_or_else(|| {
            AnnError::invalid_feature(&self.unique_id, "gene with no strand encountered")
        })?;
        Strand::try_from(raw).map_err(|value| {
            AnnError::invalid_feature(
                &self.unique_id,
                format!("gene with unknown strand type {} encountered", value),
            )
        })
    }

    /// 1-based index bounds `[begin, end)`, or `None` if the span lies past
    /// the addressable coordinate range.
    pub fn index_bounds(&self) -> Option<(OneBasedPos, u64)> {
        gene_span_to_index(ZeroBasedPos::new(self.start), ZeroBasedPos::new(self.end))
    }

    /// Span length in bases.
    pub fn span_len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Split into strand and index payload, validating the strand.
    pub fn into_gene_info(self) -> Result<(Strand, GeneInfo), AnnError> {
        let strand = self.strand()?;
        if self.residues.is_empty() {
            warn!("Gene {} has no residues", self.unique_id);
        } else if self.residues.len() as u64 != self.span_len() {
            warn!(
                "Gene {} has {} residues but spans {} bases",
                self.unique_id,
                self.residues.len(),
                self.span_len()
            );
        }
        Ok((
            strand,
            GeneInfo {
                unique_id: self.unique_id,
                name: self.name,
                residues: self.residues,
            },
        ))
    }
}

/// Payload stored with each indexed gene interval.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneInfo {
    /// Locus identifier
    pub unique_id: String,
    /// Gene name
    pub name: String,
    /// Coding sequence in transcription direction
    pub residues: String,
}

/// Parse gene records from a JSON array.
///
/// Residues are upper-cased.
pub fn parse_gene_records<R: Read>(reader: R) -> Result<Vec<GeneFeatureRecord>, AnnError> {
    let mut records: Vec<GeneFeatureRecord> = serde_json::from_reader(reader)?;
    for record in &mut records {
        record.residues.make_ascii_uppercase();
    }
    Ok(records)
}

/// Load gene records from a JSON file, gunzipping `*.gz` files.
pub fn load_gene_records(path: &Path) -> Result<Vec<GeneFeatureRecord>, AnnError> {
    let file = File::open(path).map_err(|e| AnnError::Io {
        msg: format!("{}: {}", path.display(), e),
    })?;
    let is_gz = path.extension().is_some_and(|ext| ext == "gz");
    let records = if is_gz {
        parse_gene_records(BufReader::new(MultiGzDecoder::new(file)))?
    } else {
        parse_gene_records(BufReader::new(file))?
    };
    info!("Loaded {} gene records from {}", records.len(), path.display());
    Ok(records)
}

//! Error types for ferro-ann
//!
//! All fallible operations return [`AnnError`]. Each variant maps to an
//! [`ErrorCode`] so callers can branch on the category without matching
//! message text:
//! - `E1xxx`: bad input (gene records, alleles, coordinates)
//! - `E2xxx`: internal consistency failures in the classifier
//! - `E9xxx`: I/O and serialization

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Gene feature record is missing a strand or has an unknown one
    InvalidFeature = 1001,
    /// Allele is not a single A/C/G/T nucleotide
    InvalidAllele = 1002,
    /// Codon is truncated or contains a non-ACGT base
    InvalidCodon = 1003,
    /// Offset falls outside the gene residues
    PositionOutOfBounds = 1004,
    /// Variant input line could not be parsed
    InvalidInput = 1005,

    // Internal consistency errors (E2xxx)
    /// Codon classified as both start and stop
    CodonConflict = 2001,
    /// Effect has no entry in the impact table
    UnknownEffect = 2002,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFeature => "invalid gene feature record",
            ErrorCode::InvalidAllele => "invalid allele",
            ErrorCode::InvalidCodon => "invalid codon",
            ErrorCode::PositionOutOfBounds => "position out of bounds",
            ErrorCode::InvalidInput => "invalid variant input",
            ErrorCode::CodonConflict => "codon is both start and stop",
            ErrorCode::UnknownEffect => "effect has no impact",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-ann operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnError {
    /// Gene feature record rejected at index-build time
    #[error("Invalid gene feature {id}: {msg}")]
    InvalidFeature { id: String, msg: String },

    /// Allele is not a single nucleotide
    #[error("Invalid allele '{allele}': expected a single A, C, G or T")]
    InvalidAllele { allele: String },

    /// Codon could not be translated
    #[error("Invalid codon '{codon}'")]
    InvalidCodon { codon: String },

    /// Variant offset lies outside the gene sequence
    #[error("Offset {offset} is outside gene sequence of length {length}")]
    PositionOutOfBounds { offset: i64, length: usize },

    /// Variant input line could not be parsed
    #[error("Invalid input: {msg}")]
    InvalidInput { msg: String },

    /// A codon was classified as both a start and a stop codon
    #[error("Codon {codon} at offset {offset} is both a start and a stop codon")]
    CodonConflict { codon: String, offset: usize },

    /// Effect missing from the impact table
    #[error("Effect {effect} has unknown impact")]
    UnknownEffect { effect: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl AnnError {
    /// Shorthand for an [`AnnError::InvalidFeature`]
    pub fn invalid_feature(id: impl Into<String>, msg: impl Into<String>) -> Self {
        AnnError::InvalidFeature {
            id: id.into(),
            msg: msg.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            AnnError::InvalidFeature { .. } => ErrorCode::InvalidFeature,
            AnnError::InvalidAllele { .. } => ErrorCode::InvalidAllele,
            AnnError::InvalidCodon { .. } => ErrorCode::InvalidCodon,
            AnnError::PositionOutOfBounds { .. } => ErrorCode::PositionOutOfBounds,
            AnnError::InvalidInput { .. } => ErrorCode::InvalidInput,
            AnnError::CodonConflict { .. } => ErrorCode::CodonConflict,
            AnnError::UnknownEffect { .. } => ErrorCode::UnknownEffect,
            AnnError::Io { .. } => ErrorCode::IoError,
            AnnError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Whether this error indicates a bug or corrupt table rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AnnError::CodonConflict { .. } | AnnError::UnknownEffect { .. }
        )
    }

    /// Error message prefixed with its code, e.g. `[E1001] Invalid gene feature ...`
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for AnnError {
    fn from(err: std::io::Error) -> Self {
        AnnError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnnError {
    fn from(err: serde_json::Error) -> Self {
        AnnError::Json {
            msg: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::InvalidFeature.as_str(), "E1001");
        assert_eq!(ErrorCode::CodonConflict.as_str(), "E2001");
        assert_eq!(ErrorCode::JsonError.to_string(), "E9002");
    }

    #[test]
    fn test_error_codes_by_variant() {
        let err = AnnError::invalid_feature("Rv0001", "missing strand");
        assert_eq!(err.code(), ErrorCode::InvalidFeature);
        assert!(!err.is_internal());

        let err = AnnError::UnknownEffect {
            effect: "frameshift_variant".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownEffect);
        assert!(err.is_internal());
    }

    #[test]
    fn test_display() {
        let err = AnnError::invalid_feature("Rv0001", "missing strand");
        assert_eq!(err.to_string(), "Invalid gene feature Rv0001: missing strand");
        assert_eq!(
            err.detailed_message(),
            "[E1001] Invalid gene feature Rv0001: missing strand"
        );

        let err = AnnError::PositionOutOfBounds {
            offset: -3,
            length: 9,
        };
        assert_eq!(
            err.to_string(),
            "Offset -3 is outside gene sequence of length 9"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "genes.json");
        let err: AnnError = io.into();
        assert!(matches!(err, AnnError::Io { .. }));
        assert_eq!(err.code(), ErrorCode::IoError);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err: AnnError = json_err.into();
        assert!(matches!(err, AnnError::Json { .. }));
    }
}

//! Parsing utilities for CLI operations
//!
//! Two record layouts are accepted, one per line:
//!
//! - `POS REF ALT [...]`
//! - VCF body lines, `CHROM POS ID REF ALT [QUAL FILTER INFO ...]`
//!
//! A REF column is never numeric, so a numeric second column marks a VCF
//! line. Lines starting with `#` are headers.

use crate::annotate::Variant;
use crate::error::AnnError;

/// Column layout of a variant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// `POS REF ALT`, extra columns ignored
    Columns,
    /// `CHROM POS ID REF ALT ...`
    Vcf,
}

impl RecordLayout {
    /// Detect the layout from the whitespace-separated fields of a line.
    fn detect(fields: &[&str]) -> Self {
        if fields.len() >= 5 && fields[1].parse::<u64>().is_ok() {
            RecordLayout::Vcf
        } else {
            RecordLayout::Columns
        }
    }

    /// Indices of the POS, REF and ALT columns.
    fn columns(self) -> (usize, usize, usize) {
        match self {
            RecordLayout::Columns => (0, 1, 2),
            RecordLayout::Vcf => (1, 3, 4),
        }
    }
}

/// One line of annotator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine<'a> {
    /// Empty or whitespace-only
    Blank,
    /// `#`-prefixed header line, including VCF `##` meta lines and `#CHROM`
    Header(&'a str),
    /// Anything else, trimmed
    Record(&'a str),
}

/// Classify a raw input line.
///
/// A UTF-8 BOM is removed from the first line only.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::{classify_line, InputLine};
///
/// assert_eq!(classify_line("2509490 T C", false), InputLine::Record("2509490 T C"));
/// assert_eq!(
///     classify_line("\u{feff}##fileformat=VCFv4.2", true),
///     InputLine::Header("##fileformat=VCFv4.2")
/// );
/// assert_eq!(classify_line("  \t", false), InputLine::Blank);
/// ```
pub fn classify_line(line: &str, is_first_line: bool) -> InputLine<'_> {
    let line = if is_first_line {
        line.strip_prefix('\u{feff}').unwrap_or(line)
    } else {
        line
    };
    let line = line.trim();
    if line.is_empty() {
        InputLine::Blank
    } else if line.starts_with('#') {
        InputLine::Header(line)
    } else {
        InputLine::Record(line)
    }
}

/// A parsed variant with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord<'a> {
    pub variant: Variant,
    pub layout: RecordLayout,
    /// The record line as read, used to echo VCF lines
    pub line: &'a str,
}

/// Parse a record line in either layout.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::{parse_record, RecordLayout};
///
/// let record = parse_record("NC_000962.3\t2509490\t.\tT\tC\t50\tPASS\tDP=12").unwrap();
/// assert_eq!(record.layout, RecordLayout::Vcf);
/// assert_eq!(record.variant.position, 2509490);
/// ```
pub fn parse_record(line: &str) -> Result<VariantRecord<'_>, AnnError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(AnnError::InvalidInput {
            msg: format!(
                "expected POS REF ALT or CHROM POS ID REF ALT, got {} field{}",
                fields.len(),
                if fields.len() == 1 { "" } else { "s" }
            ),
        });
    }

    let layout = RecordLayout::detect(&fields);
    let (pos, reference, alternate) = layout.columns();

    let position: u64 = fields[pos].parse().map_err(|_| AnnError::InvalidInput {
        msg: format!("Invalid position '{}': not a valid integer", fields[pos]),
    })?;
    if position == 0 {
        return Err(AnnError::InvalidInput {
            msg: "position must be 1-based".to_string(),
        });
    }

    Ok(VariantRecord {
        variant: Variant::parse(position, fields[reference], fields[alternate])?,
        layout,
        line,
    })
}

/// Parse a record line into a [`Variant`]
///
/// Fields may be separated by any run of tabs or spaces.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::parse_variant_line;
/// use ferro_ann::codon::Base;
///
/// let variant = parse_variant_line("2509490\tT\tC").unwrap();
/// assert_eq!(variant.position, 2509490);
/// assert_eq!(variant.reference, Base::T);
/// assert_eq!(variant.alternate, Base::C);
/// ```
pub fn parse_variant_line(line: &str) -> Result<Variant, AnnError> {
    parse_record(line).map(|record| record.variant)
}

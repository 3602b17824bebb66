//! Output formatting utilities for CLI operations

use serde_json::json;
use std::io::{self, Write};
use std::str::FromStr;

use super::parse::{RecordLayout, VariantRecord};
use crate::annotate::Annotation;
use crate::error::AnnError;

/// VCF meta line declaring the `ANN` INFO field.
pub const ANN_HEADER: &str = "##INFO=<ID=ANN,Number=.,Type=String,Description=\"Functional \
annotations: 'Allele | Annotation | Annotation_Impact | Gene_Name | Gene_ID | Feature_Type | \
Feature_ID | Transcript_BioType | Rank | HGVS.c | HGVS.p | cDNA.pos / cDNA.length | \
CDS.pos / CDS.length | AA.pos / AA.length | Distance | ERRORS / WARNINGS / INFO'\">";

/// 0-based index of the VCF INFO column.
const VCF_INFO_COLUMN: usize = 7;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Input records echoed with their annotation (default)
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    /// Parse an output format from a string
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_ann::cli::OutputFormat;
    /// use std::str::FromStr;
    ///
    /// assert!(matches!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json));
    /// assert!(matches!(OutputFormat::from_str("TSV").unwrap(), OutputFormat::Text));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        })
    }
}

/// Copy a header line to text output
///
/// The `ANN` meta line is written just before `#CHROM`, and any `ANN`
/// meta line already in the input is dropped. JSON output has no header.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::{output_header, OutputFormat, ANN_HEADER};
///
/// let mut buffer = Vec::new();
/// output_header(&mut buffer, "#CHROM\tPOS\tID\tREF\tALT", OutputFormat::Text).unwrap();
/// let text = String::from_utf8(buffer).unwrap();
/// assert!(text.starts_with(ANN_HEADER));
/// assert!(text.ends_with("#CHROM\tPOS\tID\tREF\tALT\n"));
/// ```
pub fn output_header<W: Write>(
    writer: &mut W,
    header: &str,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json || header.starts_with("##INFO=<ID=ANN,") {
        return Ok(());
    }
    if header.starts_with("#CHROM") {
        writeln!(writer, "{}", ANN_HEADER)?;
    }
    writeln!(writer, "{}", header)
}

/// Add an `ANN=` value to the INFO column of a VCF body line.
///
/// Columns are rejoined with tabs. QUAL, FILTER and INFO are filled with
/// `.` when missing, and an INFO of `.` is replaced.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::vcf_with_ann;
///
/// assert_eq!(
///     vcf_with_ann("c\t5\t.\tA\tG\t.\tPASS\tDP=3", Some("ANN=G")),
///     "c\t5\t.\tA\tG\t.\tPASS\tDP=3;ANN=G"
/// );
/// assert_eq!(
///     vcf_with_ann("c 5 . A G", Some("ANN=G")),
///     "c\t5\t.\tA\tG\t.\t.\tANN=G"
/// );
/// ```
pub fn vcf_with_ann(line: &str, ann: Option<&str>) -> String {
    let mut fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if fields.len() <= VCF_INFO_COLUMN {
        fields.resize(VCF_INFO_COLUMN + 1, ".".to_string());
    }
    if let Some(ann) = ann {
        let info = &mut fields[VCF_INFO_COLUMN];
        if info == "." {
            *info = ann.to_string();
        } else {
            info.push(';');
            info.push_str(ann);
        }
    }
    fields.join("\t")
}

/// Write the annotation of one record
///
/// In text output, `POS REF ALT` records are written as
/// `POS\tREF\tALT\tANN=...` with `.` for intergenic variants, and VCF
/// records are echoed with `ANN` added to INFO (unchanged when
/// intergenic). JSON output writes one object per record with `null`
/// annotation fields for intergenic variants.
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::{output_annotation, parse_record, OutputFormat};
///
/// let mut buffer = Vec::new();
/// let record = parse_record("100 A G").unwrap();
/// output_annotation(&mut buffer, &record, None, OutputFormat::Text).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "100\tA\tG\t.\n");
/// ```
pub fn output_annotation<W: Write>(
    writer: &mut W,
    record: &VariantRecord<'_>,
    annotation: Option<&Annotation>,
    format: OutputFormat,
) -> io::Result<()> {
    let variant = &record.variant;
    let ann = annotation.map(Annotation::to_ann_string);
    match (format, record.layout) {
        (OutputFormat::Text, RecordLayout::Columns) => writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            variant.position,
            variant.reference,
            variant.alternate,
            ann.as_deref().unwrap_or(".")
        ),
        (OutputFormat::Text, RecordLayout::Vcf) => {
            writeln!(writer, "{}", vcf_with_ann(record.line, ann.as_deref()))
        }
        (OutputFormat::Json, _) => {
            let value = json!({
                "pos": variant.position,
                "ref": variant.reference.to_string(),
                "alt": variant.alternate.to_string(),
                "effect": annotation.map(|a| a.effect.so_term()),
                "impact": annotation.map(|a| a.impact.as_str()),
                "locus_id": annotation.map(|a| a.locus_id.as_str()),
                "ann": ann,
            });
            writeln!(writer, "{}", value)
        }
    }
}

/// Write an error for one input line
///
/// # Examples
///
/// ```
/// use ferro_ann::cli::{output_error, OutputFormat};
/// use ferro_ann::AnnError;
/// use std::io::Cursor;
///
/// let mut buffer = Cursor::new(Vec::new());
/// let error = AnnError::InvalidAllele { allele: "N".to_string() };
/// output_error(&mut buffer, "100 N G", &error, OutputFormat::Text, Some(42)).unwrap();
/// let result = String::from_utf8(buffer.into_inner()).unwrap();
/// assert!(result.contains("line 42"));
/// assert!(result.contains("E1002"));
/// ```
pub fn output_error<W: Write>(
    writer: &mut W,
    input: &str,
    error: &AnnError,
    format: OutputFormat,
    line_number: Option<usize>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "input": input,
                "error": error.to_string(),
                "code": error.code().as_str(),
                "line": line_number,
                "status": "error",
            });
            writeln!(writer, "{}", value)
        }
        OutputFormat::Text => match line_number {
            Some(line) => writeln!(
                writer,
                "ERROR (line {}): {} - {}",
                line,
                input,
                error.detailed_message()
            ),
            None => writeln!(writer, "ERROR: {} - {}", input, error.detailed_message()),
        },
    }
}

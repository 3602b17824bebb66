//! CLI utilities for ferro-ann
//!
//! Testable pieces of the `ferro-ann annotate` loop: classifying and
//! parsing input lines, and writing annotated records.

pub mod format;
pub mod parse;

pub use format::{
    output_annotation, output_error, output_header, vcf_with_ann, OutputFormat, ANN_HEADER,
};
pub use parse::{
    classify_line, parse_record, parse_variant_line, InputLine, RecordLayout, VariantRecord,
};

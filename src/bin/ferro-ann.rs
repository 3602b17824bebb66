// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-ann CLI
//!
//! Command-line interface for annotating bacterial SNVs with gene effects.

use clap::{Parser, Subcommand};
use env_logger::Env;
use ferro_ann::cli::{
    classify_line, output_annotation, output_error, output_header, parse_record, InputLine,
    OutputFormat,
};
use ferro_ann::config::FerroAnnConfig;
use ferro_ann::gene::{load_gene_records, Strand};
use ferro_ann::{AnnError, Annotator, GeneIndex};
use flate2::read::MultiGzDecoder;
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ferro-ann")]
#[command(author, version, about = "Bacterial variant effect annotator")]
#[command(
    long_about = "Annotate single-nucleotide variants with SnpEff-style ANN values.

Examples:
  ferro-ann annotate --genes genes.json.gz -i variants.tsv
  ferro-ann annotate --genes genes.json.gz -i calls.vcf.gz -o calls.ann.vcf
  printf '2509490\\tT\\tC\\n' | ferro-ann annotate --genes genes.json
  ferro-ann genes --genes genes.json.gz"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate POS REF ALT lines or VCF records
    Annotate {
        /// Gene records as a JSON array (optionally gzipped)
        #[arg(long)]
        genes: PathBuf,

        /// Input variants (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output file (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Bases past an intergenic variant to search for a gene start
        #[arg(long)]
        upstream_window: Option<u64>,

        /// Classify minus-strand genes with alleles as given
        #[arg(long)]
        no_complement_minus: bool,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Print gene index statistics
    Genes {
        /// Gene records as a JSON array (optionally gzipped)
        #[arg(long)]
        genes: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    match cli.command {
        Commands::Annotate {
            genes,
            input,
            output,
            upstream_window,
            no_complement_minus,
            format,
        } => run_annotate(
            &genes,
            &input,
            &output,
            upstream_window,
            no_complement_minus,
            &format,
        ),
        Commands::Genes { genes } => run_genes(&genes),
    }
}

fn load_index(genes: &Path) -> Result<GeneIndex, AnnError> {
    let records = load_gene_records(genes)?;
    GeneIndex::build(records)
}

fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(BufWriter::new(io::stdout())))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn run_annotate(
    genes: &Path,
    input: &Path,
    output: &Path,
    upstream_window: Option<u64>,
    no_complement_minus: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: OutputFormat = format.parse()?;
    let config = FerroAnnConfig::load()
        .unwrap_or_default()
        .merge_with_cli(upstream_window, no_complement_minus);
    info!(
        "Upstream window {} bp, complement minus strand: {}",
        config.upstream_window, config.complement_minus_strand
    );

    let annotator = Annotator::new(load_index(genes)?, config);
    let reader = open_input(input)?;
    let mut writer = open_output(output)?;
    let stderr = io::stderr();
    let mut stderr = stderr.lock();

    let mut error_count = 0usize;
    let mut total_count = 0usize;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let text = match classify_line(&line, line_num == 0) {
            InputLine::Blank => continue,
            InputLine::Header(header) => {
                output_header(&mut writer, header, format)?;
                continue;
            }
            InputLine::Record(text) => text,
        };
        total_count += 1;

        let result = parse_record(text).and_then(|record| {
            let annotation = annotator.annotate(&record.variant)?;
            Ok((record, annotation))
        });
        match result {
            Ok((record, annotation)) => {
                output_annotation(&mut writer, &record, annotation.as_ref(), format)?;
            }
            Err(e) => {
                output_error(&mut stderr, text, &e, format, Some(line_num + 1))?;
                error_count += 1;
            }
        }
    }
    writer.flush()?;
    info!("Annotated {} of {} variants", total_count - error_count, total_count);

    if error_count > 0 {
        Err(format!("{} variant(s) failed to annotate", error_count).into())
    } else {
        Ok(())
    }
}

fn run_genes(genes: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let index = load_index(genes)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for strand in Strand::BOTH {
        writeln!(out, "{}\t{}", strand, index.strand_len(strand))?;
    }
    writeln!(out, "total\t{}", index.len())?;
    Ok(())
}

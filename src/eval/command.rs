//! Functionality related to the `alnqc eval` command itself.

use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use clap::Args;
use itertools::Itertools;
use num_format::Locale;
use num_format::ToFormattedString;
use prettytable::row;
use prettytable::Table;
use rayon::prelude::*;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::accuracy::aggregate;
use crate::accuracy::aggregate::RunSummary;
use crate::accuracy::phred;
use crate::accuracy::results::Results;
use crate::accuracy::run::Run;
use crate::accuracy::run::RunReconciler;
use crate::accuracy::Error;
use crate::aligner;
use crate::utils::display::RecordCounter;
use crate::utils::formats;
use crate::utils::formats::paf::PafRecord;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `alnqc eval` subcommand.
#[derive(Args)]
pub struct EvalArgs {
    /// Read files (FASTQ, optionally gzipped) to evaluate, comma-delimited.
    #[arg(short = 'i', long, value_name = "FASTQ,..", value_delimiter = ',', required = true)]
    reads: Vec<PathBuf>,

    /// A name for each read file, comma-delimited, in the same order.
    #[arg(
        short = 'n',
        long = "run-names",
        value_name = "NAME,..",
        value_delimiter = ',',
        required = true
    )]
    run_names: Vec<String>,

    /// Reference assembly (FASTA) to align the reads against.
    #[arg(short = 'r', long, value_name = "FASTA")]
    reference: PathBuf,

    /// Minimum declared read length for a record to count towards the
    /// summary statistics.
    #[arg(short = 'l', long, value_name = "USIZE", default_value_t = 0)]
    min_read_length: usize,

    /// Minimum quality-derived Q-score for a record to count towards the
    /// summary statistics.
    #[arg(short = 'q', long, value_name = "USIZE", default_value_t = 0)]
    min_read_quality: usize,

    /// Directory to output files to. Defaults to current working directory.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: Option<PathBuf>,

    /// Output prefix for the results file that will be created.
    #[arg(short = 'p', long, value_name = "STRING", default_value = "alnqc")]
    output_prefix: String,
}

/// One (read file, run name) pair queued for evaluation, along with the
/// files its aligner invocation reads and writes.
struct RunSpec {
    name: String,
    reads: PathBuf,
    alignments: PathBuf,
    log: PathBuf,
}

//===============================//
// Prepares the `eval` subcommand //
//===============================//

/// Prepares the arguments for running the main `eval` subcommand.
pub fn eval(args: EvalArgs) -> anyhow::Result<()> {
    info!("Starting eval command...");

    //============//
    // Run names  //
    //============//

    if args.run_names.len() != args.reads.len() {
        bail!("you must specify a run name for each read file, in the same order");
    }

    if !args.run_names.iter().all_unique() {
        bail!("run names must be unique");
    }

    //==================//
    // Output Directory //
    //==================//

    let output_directory = match args.output_directory {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    if !output_directory.exists() {
        std::fs::create_dir_all(&output_directory)
            .with_context(|| "could not create output directory")?;
    }
    debug!("  [*] Output directory: {}", output_directory.display());

    //======//
    // Runs //
    //======//

    let specs: Vec<RunSpec> = args
        .run_names
        .iter()
        .zip(&args.reads)
        .map(|(name, reads)| RunSpec {
            name: name.clone(),
            reads: reads.clone(),
            alignments: output_directory.join(format!("{}_alignment.paf", name)),
            log: output_directory.join(format!("{}_minimap2.out", name)),
        })
        .collect();

    for spec in &specs {
        if !spec.reads.exists() {
            bail!("could not open file: {}", spec.reads.display());
        }
    }

    app(
        specs,
        args.reference,
        args.min_read_length,
        args.min_read_quality,
        args.output_prefix,
        output_directory,
    )
}

//==============//
// Main program //
//==============//

/// Runs the main program for the `eval` subcommand.
fn app(
    specs: Vec<RunSpec>,
    reference: PathBuf,
    min_read_length: usize,
    min_read_quality: usize,
    output_prefix: String,
    output_directory: PathBuf,
) -> anyhow::Result<()> {
    //==========================================================//
    // Alignment: spawn one aligner per run, then barrier-wait  //
    //==========================================================//

    let mut children = Vec::new();

    for spec in &specs {
        if spec.alignments.exists() {
            info!(
                "  [*] Alignment file {} already exists. Skipping alignment for run {}.",
                spec.alignments.display(),
                spec.name
            );
            continue;
        }

        info!("  [*] Aligning run {} against {}.", spec.name, reference.display());
        let child = aligner::spawn(&reference, &spec.reads, &spec.alignments, &spec.log)?;
        children.push((spec.name.clone(), child));
    }

    for (name, child) in children {
        aligner::wait(child, &name)?;
    }

    for spec in &specs {
        if !spec.alignments.exists() {
            bail!("could not open file: {}", spec.alignments.display());
        }
    }

    //===========================================================//
    // Analysis: reconcile and join each run as its own worker   //
    //===========================================================//

    info!("Evaluating {} runs.", specs.len());

    let runs: Vec<(String, anyhow::Result<Run>)> = specs
        .par_iter()
        .map(|spec| (spec.name.clone(), evaluate_run(spec)))
        .collect();

    //==========================================================//
    // Aggregation: summarize each run, then reduce across runs //
    //==========================================================//

    let mut summaries = Vec::new();

    for (name, result) in runs {
        let run = match result {
            Ok(run) => run,
            Err(err) => {
                error!("Run {} failed and is excluded from results: {:#}", name, err);
                continue;
            }
        };

        match aggregate::summarize(&run, min_read_length, min_read_quality) {
            Ok(summary) => summaries.push(summary),
            Err(err @ Error::EmptyRun { .. }) => {
                warn!("{}", err);
                summaries.push(RunSummary::empty(name));
            }
            Err(err) => return Err(err.into()),
        }
    }

    if summaries.is_empty() {
        bail!("no run could be evaluated");
    }

    //=====================================//
    // Finalize: report and write results  //
    //=====================================//

    let mut table = Table::new();
    table.add_row(row![
        "Run",
        "Reference",
        "Records",
        "Mean Accuracy (%)",
        "Mean Q-score"
    ]);

    for summary in &summaries {
        if let Some(mean) = summary.mean_accuracy {
            table.add_row(row![
                summary.run_name,
                "(all)",
                summary.overall.len(),
                format!("{:.4}", mean),
                format!("{:.2}", phred::accuracy_to_q_score(mean)),
            ]);
        } else {
            table.add_row(row![summary.run_name, "(all)", 0, "N/A", "N/A"]);
        }

        for reference in &summary.by_reference {
            if let Some(mean) = reference.mean_accuracy {
                table.add_row(row![
                    summary.run_name,
                    reference.reference_name,
                    reference.series.len(),
                    format!("{:.4}", mean),
                    format!("{:.2}", phred::accuracy_to_q_score(mean)),
                ]);
            }
        }
    }

    table.printstd();

    let results = Results { runs: summaries };
    results.write(output_prefix, &output_directory)?;
    info!("Results written to {}.", output_directory.display());

    Ok(())
}

//====================//
// Per-run evaluation //
//====================//

/// Evaluates a single run: reconciles its alignment records, then joins the
/// base call qualities from its read file.
fn evaluate_run(spec: &RunSpec) -> anyhow::Result<Run> {
    //=====================================//
    // First pass: reconcile the aligner's //
    // candidate alignments                //
    //=====================================//

    info!("Reconciling alignments for run {}.", spec.name);

    let reader = std::fs::File::open(&spec.alignments)
        .map(BufReader::new)
        .with_context(|| format!("could not open file: {}", spec.alignments.display()))?;

    let mut reconciler = RunReconciler::new();
    let mut counter = RecordCounter::default();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let record: PafRecord = line
            .parse()
            .with_context(|| format!("alignment record file for run {}", spec.name))?;
        reconciler
            .process(&record)
            .with_context(|| format!("alignment record file for run {}", spec.name))?;

        counter.inc();
    }

    info!(
        "  [*] Processed {} alignment records for run {}, retaining {} reads.",
        counter.get().to_formatted_string(&Locale::en),
        spec.name,
        reconciler.len().to_formatted_string(&Locale::en),
    );

    let mut run = reconciler.finish(spec.name.clone(), spec.reads.clone(), spec.alignments.clone());

    //======================================//
    // Second pass: join base call quality  //
    // strings from the read file           //
    //======================================//

    info!("Joining base call qualities for run {}.", spec.name);

    let mut reader = formats::fastq::reader(&spec.reads)?;
    let mut counter = RecordCounter::default();

    for result in reader.records() {
        let record =
            result.with_context(|| format!("could not read file: {}", spec.reads.display()))?;

        let name = std::str::from_utf8(record.name())
            .with_context(|| format!("non-UTF-8 read name in {}", spec.reads.display()))?;
        let read_name = name.split_whitespace().next().unwrap_or(name);

        run.join_quality(read_name, record.quality_scores())
            .with_context(|| format!("read file for run {}", spec.name))?;

        counter.inc();
    }

    info!(
        "  [*] Processed {} reads for run {}.",
        counter.get().to_formatted_string(&Locale::en),
        spec.name,
    );

    Ok(run)
}

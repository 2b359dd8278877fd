//! Functionality related to the `alnqc plot` command itself.

use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use clap::Args;
use itertools::Itertools;
use tracing::info;

use crate::accuracy::results::Results;

use super::accuracy_by_reference;
use super::accuracy_distribution;
use super::length_vs_accuracy;
use super::quality_accuracy_distribution;
use super::quality_threshold;
use super::quality_vs_accuracy;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `alnqc plot` subcommand.
#[derive(Args)]
pub struct PlotArgs {
    /// `alnqc eval` results file for which to generate the plot(s).
    #[arg(value_name = "JSON")]
    pub src: PathBuf,

    /// The directory to output all files within.
    #[arg(short, long, value_name = "PATH")]
    pub output_directory: Option<PathBuf>,

    /// If provided, only prepares the plot specified (by plot name).
    #[arg(long = "only")]
    pub only_graph: Option<String>,
}

//=====================//
// Accuracy Plot trait //
//=====================//

/// A graph over the aggregated accuracy results that can be plotted by
/// `alnqc plot`.
pub trait AccuracyPlot {
    /// The name of this plot.
    fn name(&self) -> &'static str;

    /// The filename to output for this plot.
    fn filename(&self) -> &'static str;

    /// Generates the plot given a loaded results file.
    fn generate(&self, results: &Results) -> anyhow::Result<plotly::Plot>;
}

/// Gets all of the supported plots.
pub fn get_all_plots(only_graph: Option<String>) -> anyhow::Result<Vec<Box<dyn AccuracyPlot>>> {
    let mut results: Vec<Box<dyn AccuracyPlot>> = vec![
        Box::new(accuracy_distribution::AccuracyDistributionPlot),
        Box::new(quality_accuracy_distribution::QualityAccuracyDistributionPlot),
        Box::new(accuracy_by_reference::AccuracyByReferencePlot),
        Box::new(length_vs_accuracy::LengthVsAccuracyPlot),
        Box::new(quality_vs_accuracy::QualityVsAccuracyPlot),
        Box::new(quality_threshold::QualityThresholdPlot),
    ];

    if let Some(only) = only_graph {
        results = results
            .into_iter()
            .filter(|x| x.name().eq_ignore_ascii_case(&only))
            .collect_vec();

        if results.is_empty() {
            bail!("No plots matched the specified `--only` flag: {}", only);
        }
    }

    Ok(results)
}

/// Lower bound for accuracy axes: a little below the worst accuracy observed
/// anywhere in the results, clamped at zero.
pub fn accuracy_axis_floor(results: &Results) -> f64 {
    results
        .minimum_accuracy()
        .map(|min| (min - 5.0).max(0.0))
        .unwrap_or(0.0)
}

//==============//
// Main command //
//==============//

/// Main method for the `alnqc plot` subcommand.
pub fn plot(args: PlotArgs) -> anyhow::Result<()> {
    //========//
    // Source //
    //========//

    let results = Results::read(&args.src)
        .with_context(|| format!("invalid input file: {}", args.src.display()))?;

    //==================//
    // Output Directory //
    //==================//

    let output_directory = match args.output_directory {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    //=======//
    // Plots //
    //=======//

    let plots = get_all_plots(args.only_graph)?;
    for p in plots {
        // (1) Generate the plot in question.
        let plot = p.generate(&results)?;

        // (2) Write the plot to the appropriate output file.
        let mut filename = output_directory.clone();
        filename.push(String::from(p.filename()) + ".html");

        info!("  [*] Writing {} to {}", p.name(), filename.display());
        plot.write_html(filename);
    }

    Ok(())
}

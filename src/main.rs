//! `alnqc` command line tool.

use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use git_testament::git_testament;
use git_testament::render_testament;

use alnqc::eval;
use alnqc::plot;

git_testament!(TESTAMENT);

/// Command line utility for assessing sequencing read accuracy against a
/// reference assembly.
#[derive(Parser)]
#[command(name = "alnqc", version = render_testament!(TESTAMENT), propagate_version = true)]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// Only errors are printed to the stderr stream.
    #[arg(long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// All subcommands for `alnqc`.
#[derive(Subcommand)]
enum Command {
    /// Aligns reads against a reference assembly and summarizes the accuracy
    /// of each run.
    Eval(eval::command::EvalArgs),

    /// Plots accuracy information produced by the `alnqc eval` command.
    Plot(plot::command::PlotArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Eval(args) => eval::command::eval(args),
        Command::Plot(args) => plot::command::plot(args),
    }
}

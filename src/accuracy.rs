//! Core accuracy statistics for sequencing reads.
//!
//! The modules here turn one run's alignment records and base call qualities
//! into summary statistics: the difference-string scanner ([`cs`]) and quality
//! decoder ([`phred`]) produce per-read values, the reconciler ([`run`])
//! selects the best alignment per read, and the aggregator ([`aggregate`])
//! reduces a finalized run into the numeric series that get reported and
//! plotted.

use std::fmt;

pub mod aggregate;
pub mod cs;
pub mod phred;
pub mod record;
pub mod results;
pub mod run;

/// Errors that can arise while computing accuracy statistics.
///
/// These all indicate input that is corrupt or incompatible with the expected
/// formats, so none of them are recoverable where they occur: they propagate
/// to the run boundary and abort that run's pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The difference string contained a character that does not begin a
    /// recognized token.
    MalformedDifferenceString {
        /// The offending character.
        character: char,

        /// The byte offset of the offending character within the string.
        position: usize,
    },

    /// A quality string with no characters was provided.
    EmptyQualityString,

    /// A run retained no qualifying records after filtering.
    EmptyRun {
        /// The name of the run in question.
        run_name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedDifferenceString {
                character,
                position,
            } => write!(
                f,
                "could not parse character '{}' at position {} in difference string",
                character, position
            ),
            Error::EmptyQualityString => write!(f, "empty quality string"),
            Error::EmptyRun { run_name } => write!(
                f,
                "no records passed filtering for run: {}",
                run_name
            ),
        }
    }
}

impl std::error::Error for Error {}

//! Reconciliation of alignment records into one finalized run.
//!
//! An aligner may report several candidate alignments for the same read. The
//! [`RunReconciler`] reduces the stream of candidates down to the single best
//! (longest) alignment per read name, and the finalized [`Run`] then has the
//! base call qualities joined onto its surviving records.

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use indexmap::IndexMap;

use super::cs;
use super::phred;
use super::record::AlignmentRecord;
use super::record::ReadQuality;
use super::Error;
use crate::utils::formats::paf::PafRecord;

/// Minimum fraction of a read that must be covered by an alignment for the
/// candidate to be considered at all.
const MIN_ALIGNED_FRACTION: f64 = 0.9;

/// Accumulator that reduces one run's alignment lines to its best records.
#[derive(Debug, Default)]
pub struct RunReconciler {
    records: IndexMap<String, AlignmentRecord>,
    references: BTreeSet<String>,
    min_accuracy: Option<f64>,
}

impl RunReconciler {
    /// Creates an empty reconciler.
    pub fn new() -> Self {
        RunReconciler::default()
    }

    /// Processes one alignment line.
    ///
    /// Candidates covering less than 90% of their read are discarded
    /// entirely. For a read name that already holds a record, the candidate
    /// with the strictly larger alignment length wins; ties keep the record
    /// seen first.
    pub fn process(&mut self, paf: &PafRecord) -> Result<(), Error> {
        if paf.read_length == 0 {
            return Ok(());
        }

        let aligned_fraction = paf.aligned_span() as f64 / paf.read_length as f64;
        if aligned_fraction < MIN_ALIGNED_FRACTION {
            return Ok(());
        }

        let counts = cs::scan(&paf.difference_string)?;
        if counts.alignment_length() == 0 {
            // Accuracy is undefined over zero aligned bases.
            return Ok(());
        }

        let record = AlignmentRecord::new(
            paf.read_name.clone(),
            paf.reference_name.clone(),
            paf.read_length,
            counts,
        );

        // The minimum accuracy tracks every qualifying candidate, including
        // ones superseded below. It feeds the lower bound of the accuracy
        // axes when plotting.
        let accuracy = record.accuracy();
        if self.min_accuracy.map(|min| accuracy < min).unwrap_or(true) {
            self.min_accuracy = Some(accuracy);
        }

        self.references.insert(paf.reference_name.clone());

        match self.records.get(&paf.read_name) {
            Some(existing) if record.alignment_length() <= existing.alignment_length() => {}
            _ => {
                self.records.insert(paf.read_name.clone(), record);
            }
        }

        Ok(())
    }

    /// Number of distinct reads currently holding a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any record has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finalizes the reconciler into a [`Run`].
    pub fn finish(self, name: String, read_file: PathBuf, alignment_file: PathBuf) -> Run {
        Run {
            name,
            read_file,
            alignment_file,
            records: self.records,
            references: self.references.into_iter().collect(),
            min_accuracy: self.min_accuracy,
        }
    }
}

/// One (read file, run name) pair under analysis, after reconciliation.
#[derive(Debug)]
pub struct Run {
    name: String,
    read_file: PathBuf,
    alignment_file: PathBuf,
    records: IndexMap<String, AlignmentRecord>,
    references: Vec<String>,
    min_accuracy: Option<f64>,
}

impl Run {
    /// The name of this run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The read file this run was evaluated from.
    pub fn read_file(&self) -> &Path {
        &self.read_file
    }

    /// The alignment record file this run was evaluated from.
    pub fn alignment_file(&self) -> &Path {
        &self.alignment_file
    }

    /// The surviving alignment records, one per read name, in the order the
    /// reads were first retained.
    pub fn records(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.records.values()
    }

    /// The distinct reference sequence names observed among qualifying
    /// candidates, sorted ascending.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// The minimum accuracy observed across all qualifying candidates, or
    /// [`None`] when no candidate qualified.
    pub fn min_accuracy(&self) -> Option<f64> {
        self.min_accuracy
    }

    /// Number of reads holding a record in this run.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this run retained any records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Joins quality-derived metrics onto the record for the given read, if
    /// one survived reconciliation. Reads without a record are ignored; a
    /// read appearing more than once keeps its last quality string.
    pub fn join_quality(&mut self, read_name: &str, quality: &[u8]) -> Result<(), Error> {
        let record = match self.records.get_mut(read_name) {
            Some(record) => record,
            None => return Ok(()),
        };

        let mean_error = phred::mean_error_probability(quality)?;
        record.set_quality(ReadQuality {
            score: phred::error_to_q_score(mean_error),
            accuracy: 100.0 * (1.0 - mean_error),
        });

        Ok(())
    }
}

//! Aggregation of a finalized run into reportable numeric series.

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::record::AlignmentRecord;
use super::run::Run;
use super::Error;

/// Number of thresholds in the minimum-quality sweep (0 through 19,
/// inclusive).
pub const QUALITY_SWEEP_THRESHOLDS: usize = 20;

/// Index-aligned numeric series for one group of records: the same read
/// contributes the same index across all three sequences.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Alignment accuracy percentages.
    pub accuracies: Vec<f64>,

    /// Alignment lengths, in bases.
    pub alignment_lengths: Vec<usize>,

    /// Quality-derived accuracy percentages.
    pub quality_accuracies: Vec<f64>,
}

impl MetricSeries {
    fn push(&mut self, record: &AlignmentRecord) {
        self.accuracies.push(record.accuracy());
        self.alignment_lengths.push(record.alignment_length());
        self.quality_accuracies.push(record.quality_accuracy());
    }

    /// Number of records contributing to these series.
    pub fn len(&self) -> usize {
        self.accuracies.len()
    }

    /// Whether any record contributed to these series.
    pub fn is_empty(&self) -> bool {
        self.accuracies.is_empty()
    }
}

/// The aggregated series for one reference sequence within a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceSummary {
    /// Name of the reference sequence.
    pub reference_name: String,

    /// Mean alignment accuracy for this reference, or [`None`] when no
    /// record against it passed the thresholds.
    pub mean_accuracy: Option<f64>,

    /// Series restricted to records against this reference.
    pub series: MetricSeries,
}

/// The aggregated output of one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the run.
    pub run_name: String,

    /// Mean alignment accuracy across all threshold-passing records, or
    /// [`None`] for a run that retained nothing.
    pub mean_accuracy: Option<f64>,

    /// Minimum accuracy observed among all qualifying candidates of the run,
    /// including superseded ones.
    pub min_accuracy: Option<f64>,

    /// Series over all threshold-passing records.
    pub overall: MetricSeries,

    /// Per-reference breakdowns, sorted by reference name.
    pub by_reference: Vec<ReferenceSummary>,

    /// Accuracies of records passing each minimum Q-score threshold from 0
    /// to [`QUALITY_SWEEP_THRESHOLDS`] − 1. Raising the threshold can only
    /// shrink the set.
    pub quality_sweep: Vec<Vec<f64>>,
}

impl RunSummary {
    /// Creates the summary of a run that retained no qualifying records: the
    /// run still appears in reports and plots, with empty series.
    pub fn empty(run_name: String) -> Self {
        RunSummary {
            run_name,
            mean_accuracy: None,
            min_accuracy: None,
            overall: MetricSeries::default(),
            by_reference: Vec::new(),
            quality_sweep: vec![Vec::new(); QUALITY_SWEEP_THRESHOLDS],
        }
    }
}

/// Aggregates a finalized run into its summary.
///
/// A record contributes to the overall and per-reference series when its
/// declared read length is at least `min_read_length` and its quality-derived
/// Q-score is at least `min_read_quality`. The quality sweep applies its own
/// filters as described on [`RunSummary::quality_sweep`]: strictly greater
/// than `min_read_length`, one Q-score cutoff per threshold.
///
/// Fails with [`Error::EmptyRun`] when no record passes the thresholds.
pub fn summarize(
    run: &Run,
    min_read_length: usize,
    min_read_quality: usize,
) -> Result<RunSummary, Error> {
    let mut overall = MetricSeries::default();
    let mut accuracy_sum = 0.0;

    // Pre-seed one group per observed reference so that references whose
    // records all fail the thresholds still appear, with empty series.
    let mut by_reference: IndexMap<String, (MetricSeries, f64)> = run
        .references()
        .iter()
        .map(|name| (name.clone(), (MetricSeries::default(), 0.0)))
        .collect();

    let mut quality_sweep = vec![Vec::new(); QUALITY_SWEEP_THRESHOLDS];

    for record in run.records() {
        let accuracy = record.accuracy();

        if record.read_length() >= min_read_length && record.q_score() >= min_read_quality as f64 {
            overall.push(record);
            accuracy_sum += accuracy;

            let (series, sum) = by_reference
                .entry(record.reference_name().to_string())
                .or_default();
            series.push(record);
            *sum += accuracy;
        }

        if record.read_length() > min_read_length {
            for (threshold, accuracies) in quality_sweep.iter_mut().enumerate() {
                if record.q_score() >= threshold as f64 {
                    accuracies.push(accuracy);
                }
            }
        }
    }

    if overall.is_empty() {
        return Err(Error::EmptyRun {
            run_name: run.name().to_string(),
        });
    }

    let mean_accuracy = Some(accuracy_sum / overall.len() as f64);

    let by_reference = by_reference
        .into_iter()
        .map(|(reference_name, (series, sum))| {
            let mean_accuracy = if series.is_empty() {
                None
            } else {
                Some(sum / series.len() as f64)
            };

            ReferenceSummary {
                reference_name,
                mean_accuracy,
                series,
            }
        })
        .collect();

    Ok(RunSummary {
        run_name: run.name().to_string(),
        mean_accuracy,
        min_accuracy: run.min_accuracy(),
        overall,
        by_reference,
        quality_sweep,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accuracy::run::RunReconciler;
    use crate::utils::formats::paf::PafRecord;

    fn line(read: &str, len: usize, end: usize, reference: &str, cs: &str) -> PafRecord {
        format!(
            "{}\t{}\t0\t{}\t+\t{}\t1000000\t0\t{}\t{}\t{}\t60\tcs:Z:{}",
            read, len, end, reference, end, end, end, cs
        )
        .parse()
        .unwrap()
    }

    fn run_from(lines: &[PafRecord]) -> crate::accuracy::run::Run {
        let mut reconciler = RunReconciler::new();
        for candidate in lines {
            reconciler.process(candidate).unwrap();
        }
        reconciler.finish("run1".into(), "run1.fq".into(), "run1_alignment.paf".into())
    }

    #[test]
    fn test_overall_series_are_index_aligned() {
        let mut run = run_from(&[
            line("read1", 100, 100, "ref1", ":100"),
            line("read2", 200, 200, "ref2", ":198*ac*gt"),
        ]);
        run.join_quality("read1", &vec![b'+'; 100]).unwrap();

        let summary = summarize(&run, 0, 0).unwrap();

        assert_eq!(summary.overall.len(), 2);
        assert_eq!(summary.overall.alignment_lengths, vec![100, 200]);
        assert!((summary.overall.accuracies[0] - 100.0).abs() < 1e-12);
        assert!((summary.overall.accuracies[1] - 99.0).abs() < 1e-12);
        assert!((summary.overall.quality_accuracies[0] - 90.0).abs() < 1e-9);
        assert_eq!(summary.overall.quality_accuracies[1], 0.0);
    }

    #[test]
    fn test_mean_accuracy_is_over_passing_records_only() {
        let mut run = run_from(&[
            line("read1", 100, 100, "ref1", ":90*aa:8"),
            line("read2", 500, 500, "ref1", ":500"),
        ]);
        run.join_quality("read1", &vec![b'+'; 100]).unwrap();
        run.join_quality("read2", &vec![b'+'; 500]).unwrap();

        // Only read2 is long enough.
        let summary = summarize(&run, 200, 0).unwrap();

        assert_eq!(summary.overall.len(), 1);
        assert!((summary.mean_accuracy.unwrap() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_quality_threshold_excludes_unjoined_records() {
        let mut run = run_from(&[
            line("read1", 100, 100, "ref1", ":100"),
            line("read2", 100, 100, "ref1", ":100"),
        ]);

        // read2 never appears in the read file, so its Q-score stays 0 and
        // any nonzero minimum quality excludes it.
        run.join_quality("read1", &vec![b'5'; 100]).unwrap();

        let summary = summarize(&run, 0, 5).unwrap();
        assert_eq!(summary.overall.len(), 1);
    }

    #[test]
    fn test_per_reference_breakdown() {
        let mut run = run_from(&[
            line("read1", 100, 100, "refB", ":98*aa*cc"),
            line("read2", 100, 100, "refA", ":100"),
            line("read3", 100, 100, "refA", ":100"),
        ]);
        for read in ["read1", "read2", "read3"] {
            run.join_quality(read, &vec![b'5'; 100]).unwrap();
        }

        let summary = summarize(&run, 0, 0).unwrap();

        // Sorted by reference name, regardless of observation order.
        let names: Vec<_> = summary
            .by_reference
            .iter()
            .map(|reference| reference.reference_name.as_str())
            .collect();
        assert_eq!(names, ["refA", "refB"]);

        assert_eq!(summary.by_reference[0].series.len(), 2);
        assert!((summary.by_reference[0].mean_accuracy.unwrap() - 100.0).abs() < 1e-12);
        assert_eq!(summary.by_reference[1].series.len(), 1);
        assert!((summary.by_reference[1].mean_accuracy.unwrap() - 98.0).abs() < 1e-12);
    }

    #[test]
    fn test_filtered_reference_keeps_empty_series() {
        let mut run = run_from(&[
            line("read1", 100, 100, "refA", ":100"),
            line("read2", 1000, 1000, "refB", ":1000"),
        ]);
        run.join_quality("read1", &vec![b'5'; 100]).unwrap();
        run.join_quality("read2", &vec![b'5'; 1000]).unwrap();

        let summary = summarize(&run, 500, 0).unwrap();

        assert_eq!(summary.by_reference.len(), 2);
        let ref_a = &summary.by_reference[0];
        assert_eq!(ref_a.reference_name, "refA");
        assert!(ref_a.series.is_empty());
        assert!(ref_a.mean_accuracy.is_none());
    }

    #[test]
    fn test_quality_sweep_shrinks_monotonically() {
        let mut run = run_from(&[
            line("read1", 100, 100, "ref1", ":100"),
            line("read2", 100, 100, "ref1", ":100"),
            line("read3", 100, 100, "ref1", ":100"),
        ]);
        run.join_quality("read1", &vec![b'+'; 100]).unwrap(); // Q10
        run.join_quality("read2", &vec![b'5'; 100]).unwrap(); // Q20
        // read3 stays unjoined, Q-score 0.

        let summary = summarize(&run, 0, 0).unwrap();

        assert_eq!(summary.quality_sweep.len(), QUALITY_SWEEP_THRESHOLDS);
        for window in summary.quality_sweep.windows(2) {
            assert!(window[1].len() <= window[0].len());
        }

        assert_eq!(summary.quality_sweep[0].len(), 3);
        assert_eq!(summary.quality_sweep[1].len(), 2);
        assert_eq!(summary.quality_sweep[11].len(), 1);
        assert_eq!(summary.quality_sweep[19].len(), 1);
    }

    #[test]
    fn test_quality_sweep_length_filter_is_strict() {
        let mut run = run_from(&[line("read1", 100, 100, "ref1", ":100")]);
        run.join_quality("read1", &vec![b'5'; 100]).unwrap();

        // The read passes the inclusive overall filter at exactly the
        // minimum length, but not the sweep's strict filter.
        let summary = summarize(&run, 100, 0).unwrap();
        assert_eq!(summary.overall.len(), 1);
        assert!(summary.quality_sweep.iter().all(|accuracies| accuracies.is_empty()));
    }

    #[test]
    fn test_empty_run_is_an_error() {
        let mut run = run_from(&[line("read1", 100, 100, "ref1", ":100")]);
        run.join_quality("read1", &vec![b'+'; 100]).unwrap();

        let err = summarize(&run, 0, 50).unwrap_err();
        assert_eq!(
            err,
            Error::EmptyRun {
                run_name: "run1".into()
            }
        );
    }

    #[test]
    fn test_best_alignment_survives_end_to_end() {
        // Two candidates for the same read, both passing the aligned-fraction
        // filter, with alignment lengths 40 and 60. Only the 60-base record
        // survives, and its accuracy comes from its own counts.
        let mut run = run_from(&[
            line("read1", 60, 58, "ref1", ":36*aa*cc:2"),
            line("read1", 60, 60, "ref1", ":54*ac:3*gg:1"),
        ]);
        run.join_quality("read1", &vec![b'5'; 60]).unwrap();

        let summary = summarize(&run, 0, 0).unwrap();

        assert_eq!(summary.overall.alignment_lengths, vec![60]);
        assert!((summary.overall.accuracies[0] - 100.0 * 58.0 / 60.0).abs() < 1e-12);
        assert!((summary.mean_accuracy.unwrap() - 100.0 * 58.0 / 60.0).abs() < 1e-12);
    }
}

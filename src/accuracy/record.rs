//! The per-read alignment record.

use super::cs::DifferenceCounts;

/// Quality-derived metrics joined onto an alignment record from the read
/// file.
#[derive(Clone, Copy, Debug)]
pub struct ReadQuality {
    /// Q-score derived from the mean per-base error probability.
    pub score: f64,

    /// Accuracy percentage implied by the mean per-base error probability.
    pub accuracy: f64,
}

/// One candidate alignment of a read against one reference sequence.
///
/// Records are created from qualifying alignment lines, owned exclusively by
/// their run's reconciliation mapping, and mutated exactly once afterwards
/// (by the quality join).
#[derive(Clone, Debug)]
pub struct AlignmentRecord {
    read_name: String,
    reference_name: String,
    read_length: usize,
    counts: DifferenceCounts,
    quality: Option<ReadQuality>,
}

impl AlignmentRecord {
    /// Creates an alignment record from scanned difference counts. The
    /// quality metrics remain unset until joined from the read file.
    pub fn new(
        read_name: String,
        reference_name: String,
        read_length: usize,
        counts: DifferenceCounts,
    ) -> Self {
        AlignmentRecord {
            read_name,
            reference_name,
            read_length,
            counts,
            quality: None,
        }
    }

    /// The name of the read this alignment belongs to.
    pub fn read_name(&self) -> &str {
        &self.read_name
    }

    /// The name of the reference sequence this alignment is against.
    pub fn reference_name(&self) -> &str {
        &self.reference_name
    }

    /// The declared length of the read, independent of the alignment.
    pub fn read_length(&self) -> usize {
        self.read_length
    }

    /// The base-level counts observed in this alignment.
    pub fn counts(&self) -> &DifferenceCounts {
        &self.counts
    }

    /// Total number of bases observed in this alignment.
    pub fn alignment_length(&self) -> usize {
        self.counts.alignment_length()
    }

    /// The percentage of aligned bases that match the reference.
    ///
    /// The reconciler never retains a record with an empty alignment, so the
    /// alignment length is nonzero here.
    pub fn accuracy(&self) -> f64 {
        100.0 * self.counts.matches as f64 / self.alignment_length() as f64
    }

    /// The quality-derived metrics for this read, if they have been joined.
    pub fn quality(&self) -> Option<ReadQuality> {
        self.quality
    }

    /// The quality-derived Q-score, or 0 for a record whose read was never
    /// seen in the read file.
    pub fn q_score(&self) -> f64 {
        self.quality.map(|quality| quality.score).unwrap_or(0.0)
    }

    /// The quality-derived accuracy percentage, or 0 for a record whose read
    /// was never seen in the read file.
    pub fn quality_accuracy(&self) -> f64 {
        self.quality.map(|quality| quality.accuracy).unwrap_or(0.0)
    }

    /// Sets the quality-derived metrics for this record. A later join for the
    /// same read overwrites an earlier one.
    pub fn set_quality(&mut self, quality: ReadQuality) {
        self.quality = Some(quality);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accuracy::cs;

    #[test]
    fn test_accuracy_is_derived_from_counts() {
        let counts = cs::scan(":90*ac*ac:6-tt").unwrap();
        let record = AlignmentRecord::new("read1".into(), "ref1".into(), 100, counts);

        assert_eq!(record.alignment_length(), 100);
        assert!((record.accuracy() - 96.0).abs() < 1e-12);
    }

    #[test]
    fn test_quality_defaults_until_joined() {
        let counts = cs::scan(":10").unwrap();
        let mut record = AlignmentRecord::new("read1".into(), "ref1".into(), 10, counts);

        assert!(record.quality().is_none());
        assert_eq!(record.q_score(), 0.0);
        assert_eq!(record.quality_accuracy(), 0.0);

        record.set_quality(ReadQuality {
            score: 20.0,
            accuracy: 99.0,
        });

        assert!(record.quality().is_some());
        assert_eq!(record.q_score(), 20.0);
        assert_eq!(record.quality_accuracy(), 99.0);
    }
}

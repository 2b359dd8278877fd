//! Utilities related to reading pairwise alignment (PAF) files.
//!
//! Only the subset of the format needed for accuracy computation is modeled
//! here: the read identity and length, the aligned span of the query, the
//! reference sequence name, and the trailing difference-string annotation.

use std::str::FromStr;

use anyhow::bail;
use anyhow::Context;

/// Tag prefixing the difference-string annotation in an alignment line.
const DIFFERENCE_STRING_TAG: &str = "cs:Z:";

/// One alignment line from a PAF file.
#[derive(Clone, Debug)]
pub struct PafRecord {
    /// Name of the aligned read.
    pub read_name: String,

    /// Declared length of the read.
    pub read_length: usize,

    /// Start offset of the alignment on the read (0-based).
    pub query_start: usize,

    /// End offset of the alignment on the read (exclusive).
    pub query_end: usize,

    /// Name of the reference sequence the read aligned against.
    pub reference_name: String,

    /// The difference-string annotation, with its tag stripped.
    pub difference_string: String,
}

impl PafRecord {
    /// Number of read bases covered by this alignment.
    pub fn aligned_span(&self) -> usize {
        self.query_end.saturating_sub(self.query_start)
    }
}

impl FromStr for PafRecord {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();

        if fields.len() < 6 {
            bail!("alignment line has {} fields, expected at least 6", fields.len());
        }

        let read_name = fields[0].to_string();
        let read_length = fields[1]
            .parse()
            .with_context(|| format!("invalid read length: {}", fields[1]))?;
        let query_start = fields[2]
            .parse()
            .with_context(|| format!("invalid query start: {}", fields[2]))?;
        let query_end = fields[3]
            .parse()
            .with_context(|| format!("invalid query end: {}", fields[3]))?;
        let reference_name = fields[5].to_string();

        // The difference string rides in the last field of the line.
        let last = fields[fields.len() - 1];
        let difference_string = match last.strip_prefix(DIFFERENCE_STRING_TAG) {
            Some(cs) => cs.to_string(),
            None => bail!(
                "alignment line for read {} is missing the difference-string annotation",
                read_name
            ),
        };

        Ok(PafRecord {
            read_name,
            read_length,
            query_start,
            query_end,
            reference_name,
            difference_string,
        })
    }
}

//! Scanning of compact alignment-difference ("cs") strings.
//!
//! A cs string is a run-length token stream describing how an aligned read
//! differs from the reference, e.g. `:103*ag:6-tt:51+a:32`. Four token kinds
//! exist, each determined by its lead character:
//!
//! * `:` — a run of matches; the following decimal digits give the run length.
//! * `*` — a single mismatch; the two following characters are the reference
//!   and read bases.
//! * `-` — a deletion; the following `a`/`c`/`g`/`t`/`n` characters are the
//!   deleted reference bases.
//! * `+` — an insertion; the following `a`/`c`/`g`/`t` characters are the
//!   inserted read bases.
//!
//! Anything else fails the scan with
//! [`Error::MalformedDifferenceString`](super::Error::MalformedDifferenceString).

use super::Error;

/// Base-level counts scanned from one difference string.
///
/// The alignment length of the counts is defined as the sum of all four
/// fields, and is maintained by construction: every consumed token contributes
/// to exactly one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DifferenceCounts {
    /// Number of bases that match the reference.
    pub matches: usize,

    /// Number of bases that mismatch the reference.
    pub mismatches: usize,

    /// Number of bases inserted relative to the reference.
    pub insertions: usize,

    /// Number of reference bases deleted from the read.
    pub deletions: usize,
}

impl DifferenceCounts {
    /// Total number of bases observed in the alignment.
    pub fn alignment_length(&self) -> usize {
        self.matches + self.mismatches + self.insertions + self.deletions
    }
}

/// Scans a difference string into base-level counts.
///
/// The string is consumed in a single left-to-right pass with no lookback.
/// The empty string scans to all-zero counts.
pub fn scan(cs: &str) -> Result<DifferenceCounts, Error> {
    let bytes = cs.as_bytes();
    let mut counts = DifferenceCounts::default();

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b':' => {
                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }

                // A match token with no digits carries no run length, which
                // the grammar does not allow.
                let run: usize = cs[i + 1..j].parse().map_err(|_| {
                    Error::MalformedDifferenceString {
                        character: ':',
                        position: i,
                    }
                })?;

                counts.matches += run;
                i = j;
            }
            b'*' => {
                // The mismatch token is exactly three characters wide: the
                // lead plus the reference/read base pair.
                counts.mismatches += 1;
                i += 3;
            }
            b'-' => {
                let mut j = i + 1;
                while j < bytes.len() && matches!(bytes[j], b'a' | b'c' | b'g' | b't' | b'n') {
                    j += 1;
                }

                counts.deletions += j - i - 1;
                i = j;
            }
            b'+' => {
                let mut j = i + 1;
                while j < bytes.len() && matches!(bytes[j], b'a' | b'c' | b'g' | b't') {
                    j += 1;
                }

                counts.insertions += j - i - 1;
                i = j;
            }
            c => {
                return Err(Error::MalformedDifferenceString {
                    character: c as char,
                    position: i,
                })
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_run() {
        let counts = scan(":5").unwrap();
        assert_eq!(counts.matches, 5);
        assert_eq!(counts.mismatches, 0);
        assert_eq!(counts.insertions, 0);
        assert_eq!(counts.deletions, 0);
        assert_eq!(counts.alignment_length(), 5);
    }

    #[test]
    fn test_single_mismatch() {
        let counts = scan("*ac").unwrap();
        assert_eq!(counts.mismatches, 1);
        assert_eq!(counts.alignment_length(), 1);
    }

    #[test]
    fn test_deletion_run() {
        let counts = scan("-acgt").unwrap();
        assert_eq!(counts.deletions, 4);
        assert_eq!(counts.alignment_length(), 4);
    }

    #[test]
    fn test_deletion_run_includes_n() {
        let counts = scan("-acgtn").unwrap();
        assert_eq!(counts.deletions, 5);
    }

    #[test]
    fn test_insertion_run() {
        let counts = scan("+acg").unwrap();
        assert_eq!(counts.insertions, 3);
        assert_eq!(counts.alignment_length(), 3);
    }

    #[test]
    fn test_insertion_run_stops_at_n() {
        // `n` is not a valid insertion base, so the scan should stop there and
        // then fail on `n` as an unrecognized lead character.
        let err = scan("+acgn").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDifferenceString {
                character: 'n',
                position: 4
            }
        );
    }

    #[test]
    fn test_combined_token_stream() {
        let counts = scan(":3*ac-aa+gg").unwrap();
        assert_eq!(counts.matches, 3);
        assert_eq!(counts.mismatches, 1);
        assert_eq!(counts.deletions, 2);
        assert_eq!(counts.insertions, 2);
        assert_eq!(counts.alignment_length(), 8);
    }

    #[test]
    fn test_realistic_token_stream() {
        let counts = scan(":103*ag:6-tt:51+a:32").unwrap();
        assert_eq!(counts.matches, 192);
        assert_eq!(counts.mismatches, 1);
        assert_eq!(counts.deletions, 2);
        assert_eq!(counts.insertions, 1);
        assert_eq!(counts.alignment_length(), 196);
    }

    #[test]
    fn test_empty_string_scans_to_zero() {
        let counts = scan("").unwrap();
        assert_eq!(counts, DifferenceCounts::default());
        assert_eq!(counts.alignment_length(), 0);
    }

    #[test]
    fn test_unrecognized_lead_character() {
        let err = scan("?").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDifferenceString {
                character: '?',
                position: 0
            }
        );
    }

    #[test]
    fn test_unrecognized_character_mid_stream() {
        let err = scan(":10=acgt").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDifferenceString {
                character: '=',
                position: 3
            }
        );
    }

    #[test]
    fn test_match_token_without_digits() {
        let err = scan(":").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDifferenceString {
                character: ':',
                position: 0
            }
        );

        let err = scan(":3:-a").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDifferenceString {
                character: ':',
                position: 2
            }
        );
    }

    #[test]
    fn test_truncated_mismatch_token_terminates() {
        // The mismatch token consumes three characters even when the string
        // ends early; the scan must still terminate.
        let counts = scan(":2*a").unwrap();
        assert_eq!(counts.matches, 2);
        assert_eq!(counts.mismatches, 1);
    }

    #[test]
    fn test_bare_indel_leads_consume_nothing() {
        let counts = scan("-+:4").unwrap();
        assert_eq!(counts.deletions, 0);
        assert_eq!(counts.insertions, 0);
        assert_eq!(counts.matches, 4);
    }

    #[test]
    fn test_counts_sum_to_alignment_length() {
        let cases = [":5", "*ac", "-acgt", "+acg", ":3*ac-aa+gg", ":103*ag:6-tt:51+a:32"];

        for cs in cases {
            let counts = scan(cs).unwrap();
            assert_eq!(
                counts.matches + counts.mismatches + counts.insertions + counts.deletions,
                counts.alignment_length()
            );
        }
    }
}

//! Decoding of Phred-style base quality strings.
//!
//! Each character of a quality string encodes the estimated probability that
//! its base call is incorrect: the character's code point, minus 33, is a
//! Phred quality score `Q`, and the error probability is `10^(-Q/10)`. No
//! validation of the score range is performed; out-of-range characters simply
//! produce very large or very small probabilities.

use super::Error;

/// Maximum quality score supported by the SAM specification.
///
/// Quality-derived Q-scores are clamped to this value so that a quality
/// string with a vanishing mean error probability yields a large finite
/// score rather than infinity.
pub const MAX_SCORE: f64 = 93.0;

/// Computes the mean per-base error probability of a quality string.
///
/// Fails with [`Error::EmptyQualityString`] when given zero characters, since
/// the mean over zero bases is undefined.
pub fn mean_error_probability(quality: &[u8]) -> Result<f64, Error> {
    if quality.is_empty() {
        return Err(Error::EmptyQualityString);
    }

    let total: f64 = quality
        .iter()
        .map(|&byte| {
            let score = f64::from(byte) - 33.0;
            10f64.powf(-score / 10.0)
        })
        .sum();

    Ok(total / quality.len() as f64)
}

/// Converts a mean error probability into a Q-score, clamped to
/// [`MAX_SCORE`].
pub fn error_to_q_score(mean_error: f64) -> f64 {
    if mean_error <= 0.0 {
        return MAX_SCORE;
    }

    (-10.0 * mean_error.log10()).min(MAX_SCORE)
}

/// Converts an accuracy percentage into the equivalent Q-score, clamped to
/// [`MAX_SCORE`].
pub fn accuracy_to_q_score(accuracy_pct: f64) -> f64 {
    error_to_q_score(1.0 - accuracy_pct / 100.0)
}

//! Merge confidence scoring.

use super::quality::QualityFlags;
use super::sample::WeightedSource;

/// Hard ceiling on any confidence value.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Confidence assigned when no usable samples exist.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Computes overall merge confidence from source count, total word
/// volume, and batch quality flags.
///
/// Source count contributes 0.15 per extra source up to four total;
/// word-volume bonuses stack at the 1000 and 2000 word marks. Quality
/// penalties apply multiplicatively afterward. The result is clamped to
/// [`CONFIDENCE_CAP`] and rounded to two decimals.
pub fn merged_confidence(sources: &[WeightedSource], flags: QualityFlags) -> f64 {
    let count = sources.len();
    let mut confidence = if count <= 1 {
        0.5
    } else {
        0.5 + 0.15 * (count - 1).min(3) as f64
    };

    let total_words: u64 = sources
        .iter()
        .map(|s| s.sample.effective_word_count() as u64)
        .sum();
    if total_words > 1000 {
        confidence += 0.05;
    }
    if total_words > 2000 {
        confidence += 0.05;
    }

    if flags.spam_detected {
        confidence *= 1.0 - 0.5;
    }
    if flags.low_diversity {
        confidence *= 1.0 - 0.3;
    }

    round2(confidence.min(CONFIDENCE_CAP))
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

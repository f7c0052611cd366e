//! Source weighting: quality × quantity, then batch normalization.

use super::sample::SourceSample;

/// Raw (unnormalized) weight for a single sample.
///
/// Quality comes from the source type, quantity from word count:
/// under 500 words halves the weight, over 1500 words boosts it by half.
/// Always a finite positive value in (0, 1.5].
pub fn source_weight(sample: &SourceSample) -> f64 {
    let quality = sample.source_type.quality_weight();
    let words = sample.effective_word_count();
    let quantity = if words < 500 {
        0.5
    } else if words <= 1500 {
        1.0
    } else {
        1.5
    };
    quality * quantity
}

/// Normalizes a weight vector so it sums to 1.0.
///
/// A degenerate all-zero input yields a uniform distribution rather
/// than NaNs.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        let uniform = 1.0 / weights.len() as f64;
        return vec![uniform; weights.len()];
    }
    weights.iter().map(|w| w / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::sample::SourceType;
    use crate::domain::style::writing_style::WritingStyle;
    use proptest::prelude::*;

    fn sample(source_type: SourceType, word_count: Option<u32>) -> SourceSample {
        SourceSample {
            source_type,
            writing_style: Some(WritingStyle::fallback()),
            text: None,
            word_count,
        }
    }

    #[test]
    fn gmail_with_long_text_gets_max_weight() {
        let s = sample(SourceType::Gmail, Some(2000));
        assert_eq!(source_weight(&s), 1.5);
    }

    #[test]
    fn blog_with_short_text_gets_low_weight() {
        let s = sample(SourceType::Blog, Some(300));
        assert!((source_weight(&s) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn missing_word_count_uses_unit_quantity_factor() {
        let s = sample(SourceType::Text, None);
        assert!((source_weight(&s) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn quantity_band_boundaries() {
        assert_eq!(source_weight(&sample(SourceType::Gmail, Some(499))), 0.5);
        assert_eq!(source_weight(&sample(SourceType::Gmail, Some(500))), 1.0);
        assert_eq!(source_weight(&sample(SourceType::Gmail, Some(1500))), 1.0);
        assert_eq!(source_weight(&sample(SourceType::Gmail, Some(1501))), 1.5);
    }

    #[test]
    fn normalize_single_weight_yields_one() {
        assert_eq!(normalize_weights(&[0.7]), vec![1.0]);
    }

    #[test]
    fn normalize_all_zero_yields_uniform() {
        let normalized = normalize_weights(&[0.0, 0.0, 0.0, 0.0]);
        for w in &normalized {
            assert!((w - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn normalize_empty_yields_empty() {
        assert!(normalize_weights(&[]).is_empty());
    }

    #[test]
    fn gmail_dominates_short_blog_after_normalization() {
        // Gmail 2000 words vs blog 300 words.
        let gmail = source_weight(&sample(SourceType::Gmail, Some(2000)));
        let blog = source_weight(&sample(SourceType::Blog, Some(300)));
        let normalized = normalize_weights(&[gmail, blog]);

        assert!((normalized[0] - 0.8333).abs() < 0.001);
        assert!((normalized[1] - 0.1667).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn weight_is_always_in_bounds(
            source_type in prop_oneof![
                Just(SourceType::Gmail),
                Just(SourceType::Text),
                Just(SourceType::Blog),
                Just(SourceType::Github),
                Just(SourceType::Unknown),
            ],
            word_count in proptest::option::of(0u32..100_000),
        ) {
            let w = source_weight(&sample(source_type, word_count));
            prop_assert!(w > 0.0);
            prop_assert!(w <= 1.5);
            prop_assert!(w.is_finite());
        }

        #[test]
        fn normalized_weights_sum_to_one(weights in proptest::collection::vec(0.0f64..10.0, 1..16)) {
            let normalized = normalize_weights(&weights);
            prop_assert_eq!(normalized.len(), weights.len());
            let sum: f64 = normalized.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}

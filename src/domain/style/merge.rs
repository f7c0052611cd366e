//! Merge orchestrator: weights, mergers, and confidence composed into
//! one entry point.

use std::collections::BTreeMap;

use super::confidence::{merged_confidence, FALLBACK_CONFIDENCE};
use super::mergers::{
    merge_avoidance, merge_formality, merge_sentence_length, merge_tone, merge_vocabulary,
    AttributeAttribution,
};
use super::quality::QualityFlags;
use super::sample::{SourceSample, SourceType, WeightedSource};
use super::weights::{normalize_weights, source_weight};
use super::writing_style::{Attribute, WritingStyle};

/// Result of merging a batch of source samples.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub writing_style: WritingStyle,
    pub source_attribution: BTreeMap<Attribute, AttributeAttribution>,
    pub confidence: f64,
    pub sources_used: Vec<SourceType>,
}

impl MergeOutcome {
    /// The deliberate low-confidence fallback returned when no usable
    /// samples exist. Not an error.
    pub fn fallback() -> Self {
        Self {
            writing_style: WritingStyle::fallback(),
            source_attribution: BTreeMap::new(),
            confidence: FALLBACK_CONFIDENCE,
            sources_used: Vec::new(),
        }
    }
}

/// Merges heterogeneous source samples into one weighted style profile.
///
/// Samples without an extracted style are excluded (and logged); term
/// lists are trimmed to their caps. Pure: identical input yields an
/// identical outcome and the inputs are never mutated.
pub fn merge_writing_styles(samples: &[SourceSample]) -> MergeOutcome {
    let valid: Vec<SourceSample> = samples
        .iter()
        .filter(|sample| {
            if sample.writing_style.is_none() {
                tracing::warn!(
                    source_type = %sample.source_type,
                    "excluding sample without extracted writing style"
                );
                return false;
            }
            true
        })
        .map(|sample| SourceSample {
            writing_style: sample.writing_style.clone().map(WritingStyle::sanitized),
            ..sample.clone()
        })
        .collect();

    if valid.is_empty() {
        tracing::info!("no usable samples; returning fallback profile");
        return MergeOutcome::fallback();
    }

    let raw_weights: Vec<f64> = valid.iter().map(source_weight).collect();
    let normalized = normalize_weights(&raw_weights);
    let weighted: Vec<WeightedSource> = valid
        .iter()
        .cloned()
        .zip(normalized)
        .map(|(sample, weight)| WeightedSource { sample, weight })
        .collect();

    let tone = merge_tone(&weighted);
    let formality = merge_formality(&weighted);
    let sentence_length = merge_sentence_length(&weighted);
    let vocabulary = merge_vocabulary(&weighted);
    let avoidance = merge_avoidance(&weighted);

    let flags = QualityFlags::evaluate(&valid);
    let confidence = merged_confidence(&weighted, flags);

    let mut source_attribution = BTreeMap::new();
    source_attribution.insert(Attribute::Tone, tone.attribution);
    source_attribution.insert(Attribute::Formality, formality.attribution);
    source_attribution.insert(Attribute::SentenceLength, sentence_length.attribution);
    source_attribution.insert(Attribute::Vocabulary, vocabulary.attribution);
    source_attribution.insert(Attribute::Avoidance, avoidance.attribution);

    MergeOutcome {
        writing_style: WritingStyle {
            tone: tone.value,
            formality: formality.value,
            sentence_length: sentence_length.value,
            vocabulary: vocabulary.value,
            avoidance: avoidance.value,
        },
        source_attribution,
        confidence,
        sources_used: weighted.iter().map(|s| s.sample.source_type).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::writing_style::{Formality, SentenceLength, Tone};

    fn gmail_sample() -> SourceSample {
        SourceSample::new(
            SourceType::Gmail,
            WritingStyle {
                tone: Tone::Conversational,
                formality: Formality::Casual,
                sentence_length: SentenceLength::Short,
                vocabulary: vec!["honestly".into(), "cheers".into()],
                avoidance: vec!["corporate speak".into()],
            },
            2000,
        )
    }

    fn blog_sample() -> SourceSample {
        SourceSample::new(
            SourceType::Blog,
            WritingStyle {
                tone: Tone::Professional,
                formality: Formality::Formal,
                sentence_length: SentenceLength::Long,
                vocabulary: vec!["therefore".into()],
                avoidance: vec!["slang".into()],
            },
            300,
        )
    }

    #[test]
    fn empty_batch_returns_exact_fallback() {
        let outcome = merge_writing_styles(&[]);
        assert_eq!(outcome, MergeOutcome::fallback());
        assert_eq!(outcome.confidence, 0.3);
        assert!(outcome.source_attribution.is_empty());
    }

    #[test]
    fn samples_without_style_are_excluded() {
        let invalid = SourceSample {
            source_type: SourceType::Text,
            writing_style: None,
            text: None,
            word_count: Some(800),
        };
        let outcome = merge_writing_styles(&[invalid]);
        assert_eq!(outcome.confidence, 0.3);
        assert!(outcome.sources_used.is_empty());
    }

    #[test]
    fn heavier_source_wins_every_categorical_attribute() {
        let outcome = merge_writing_styles(&[gmail_sample(), blog_sample()]);

        assert_eq!(outcome.writing_style.tone, Tone::Conversational);
        assert_eq!(outcome.writing_style.formality, Formality::Casual);
        assert_eq!(outcome.writing_style.sentence_length, SentenceLength::Short);
        assert_eq!(outcome.sources_used, vec![SourceType::Gmail, SourceType::Blog]);

        let tone_attr = &outcome.source_attribution[&Attribute::Tone];
        assert_eq!(tone_attr.sources.len(), 1);
        assert_eq!(tone_attr.sources[0].source_type, SourceType::Gmail);
        assert_eq!(tone_attr.sources[0].percentage, 100);
    }

    #[test]
    fn merge_is_idempotent_and_does_not_mutate_inputs() {
        let samples = vec![gmail_sample(), blog_sample()];
        let before = samples.clone();
        let first = merge_writing_styles(&samples);
        let second = merge_writing_styles(&samples);
        assert_eq!(first, second);
        assert_eq!(samples, before);
    }

    #[test]
    fn unanimous_tone_survives_any_weight_distribution() {
        let mut light = blog_sample();
        if let Some(style) = light.writing_style.as_mut() {
            style.tone = Tone::Conversational;
        }
        let outcome = merge_writing_styles(&[gmail_sample(), light]);
        assert_eq!(outcome.writing_style.tone, Tone::Conversational);
    }

    #[test]
    fn spam_sample_halves_batch_confidence() {
        let clean = merge_writing_styles(&[gmail_sample(), blog_sample()]);

        let spam_text = "Limited time offer ends now. ".repeat(10);
        let spammy = merge_writing_styles(&[
            gmail_sample().with_text(spam_text),
            blog_sample(),
        ]);

        assert_eq!(spammy.confidence, (clean.confidence * 0.5 * 100.0).round() / 100.0);
    }

    #[test]
    fn oversized_term_lists_are_trimmed() {
        let mut sample = gmail_sample();
        if let Some(style) = sample.writing_style.as_mut() {
            style.vocabulary = (0..10).map(|i| format!("term{}", i)).collect();
        }
        let outcome = merge_writing_styles(&[sample]);
        assert!(outcome.writing_style.vocabulary.len() <= 4);
        assert!(!outcome.writing_style.avoidance.is_empty());
    }

    #[test]
    fn attribution_percentages_sum_near_hundred() {
        let outcome = merge_writing_styles(&[gmail_sample(), blog_sample()]);
        for (attribute, attribution) in &outcome.source_attribution {
            if attribution.sources.is_empty() {
                continue;
            }
            let total: u32 = attribution.sources.iter().map(|s| s.percentage as u32).sum();
            assert!(
                (98..=102).contains(&total),
                "{} attribution summed to {}",
                attribute,
                total
            );
        }
    }
}

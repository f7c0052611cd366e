//! Quality checks feeding the confidence score.
//!
//! Spam detection works within a single sample, and vocabulary diversity
//! over the aggregate word bag. Neither compares phrases across sources:
//! the same wording recurring in different sources is genuine style
//! signal and must not be penalized.

use super::sample::SourceSample;

/// Minimum unique-sentence ratio before a sample is flagged as spam.
const SPAM_SENTENCE_RATIO: f64 = 0.3;

/// Sentences shorter than this (after trimming) are ignored.
const MIN_SENTENCE_CHARS: usize = 10;

/// Minimum unique-word ratio before a batch is flagged as low diversity.
const DIVERSITY_RATIO: f64 = 0.15;

/// Batches at or under this many words are exempt from the diversity
/// check, avoiding false positives on short inputs.
const DIVERSITY_MIN_WORDS: usize = 500;

/// Returns true when a sample's text is dominated by repeated sentences.
///
/// Samples without raw text cannot be checked and pass.
pub fn is_spam(sample: &SourceSample) -> bool {
    let Some(text) = sample.text.as_deref() else {
        return false;
    };

    let sentences: Vec<String> = text
        .split(['.', '!', '?'])
        .map(|s| s.trim().to_lowercase())
        .filter(|s| s.len() >= MIN_SENTENCE_CHARS)
        .collect();

    if sentences.is_empty() {
        return false;
    }

    let mut unique: Vec<&str> = Vec::new();
    for sentence in &sentences {
        if !unique.contains(&sentence.as_str()) {
            unique.push(sentence);
        }
    }

    (unique.len() as f64 / sentences.len() as f64) < SPAM_SENTENCE_RATIO
}

/// Returns true when the combined word bag of all samples shows
/// unusually low lexical diversity.
pub fn is_low_diversity(samples: &[SourceSample]) -> bool {
    let mut words: Vec<String> = Vec::new();
    for sample in samples {
        let Some(text) = sample.text.as_deref() else {
            continue;
        };
        for raw in text.split_whitespace() {
            let word: String = raw
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.len() > 3 {
                words.push(word);
            }
        }
    }

    if words.len() <= DIVERSITY_MIN_WORDS {
        return false;
    }

    let mut unique: std::collections::HashSet<&str> = std::collections::HashSet::new();
    for word in &words {
        unique.insert(word);
    }

    (unique.len() as f64 / words.len() as f64) < DIVERSITY_RATIO
}

/// Outcome of the batch quality checks, consumed by the confidence
/// calculator as multiplicative penalties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityFlags {
    pub spam_detected: bool,
    pub low_diversity: bool,
}

impl QualityFlags {
    /// Runs both checks over a merge batch.
    pub fn evaluate(samples: &[SourceSample]) -> Self {
        Self {
            spam_detected: samples.iter().any(is_spam),
            low_diversity: is_low_diversity(samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::sample::SourceType;
    use crate::domain::style::writing_style::WritingStyle;

    fn sample_with_text(text: &str) -> SourceSample {
        SourceSample::new(SourceType::Text, WritingStyle::fallback(), 500).with_text(text)
    }

    #[test]
    fn repeated_sentence_is_flagged_as_spam() {
        let text = "Buy my amazing product today. ".repeat(10);
        assert!(is_spam(&sample_with_text(&text)));
    }

    #[test]
    fn varied_text_is_not_spam() {
        let text = "The morning was cold. I wrote for an hour before breakfast. \
                    Later we walked to the harbor and watched the boats come in. \
                    Nothing about the day felt rushed.";
        assert!(!is_spam(&sample_with_text(text)));
    }

    #[test]
    fn sample_without_text_passes_spam_check() {
        let sample = SourceSample::new(SourceType::Gmail, WritingStyle::fallback(), 500);
        assert!(!is_spam(&sample));
    }

    #[test]
    fn short_fragments_are_ignored_by_spam_check() {
        // Every split piece is under 10 chars, so nothing to measure.
        assert!(!is_spam(&sample_with_text("ok. ok. ok. ok. ok.")));
    }

    #[test]
    fn short_batches_are_exempt_from_diversity_check() {
        let samples = vec![sample_with_text(&"word word word word ".repeat(30))];
        assert!(!is_low_diversity(&samples));
    }

    #[test]
    fn long_repetitive_batch_is_flagged_low_diversity() {
        // ~600 words drawn from a 10-word alphabet: ratio well under 0.15.
        let text = "apple banana cherry grape orange melon peach plum mango lemon ".repeat(60);
        let samples = vec![sample_with_text(&text)];
        assert!(is_low_diversity(&samples));
    }

    #[test]
    fn long_varied_batch_is_not_flagged() {
        let text: String = (0..700).map(|i| format!("word{} ", i)).collect();
        let samples = vec![sample_with_text(&text)];
        assert!(!is_low_diversity(&samples));
    }

    #[test]
    fn cross_source_repetition_alone_is_not_penalized() {
        // The same short phrase in two different sources: each sample is
        // individually varied enough and the aggregate is short.
        let a = sample_with_text("Thanks for reaching out. Happy to help with this next week.");
        let b = sample_with_text("Thanks for reaching out. The report is attached below here.");
        let flags = QualityFlags::evaluate(&[a, b]);
        assert!(!flags.spam_detected);
        assert!(!flags.low_diversity);
    }
}

//! Incremental profile refinement from conversation text.
//!
//! Refinement nudges an existing profile toward a fresh style guess
//! instead of replacing it. Adjustments are gated by per-attribute
//! confidence and by how much new text backs the guess, so established
//! profiles resist noise while young ones adapt quickly.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::confidence::{round2, CONFIDENCE_CAP};
use super::profile::{StyleProfile, CONVERSATION_WORDS_KEY};
use super::writing_style::{Attribute, WritingStyle};

/// Per-refinement confidence growth before diminishing returns.
const BASE_INCREASE: f64 = 0.05;

/// Word count at which a refinement batch carries full weight.
const FULL_WEIGHT_WORDS: f64 = 500.0;

/// One attribute that changed during a refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub old_value: serde_json::Value,
    pub new_value: serde_json::Value,
    pub change_percent: i8,
}

/// Summary of one refinement call. Ephemeral; shown to the caller and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub changes: Vec<AttributeChange>,
    pub words_analyzed: u32,
    pub confidence_change: f64,
    pub timestamp: Timestamp,
}

/// Joins conversation messages into one analyzable blob and counts its
/// words.
pub fn conversation_blob(messages: &[String]) -> (String, u32) {
    let blob = messages
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    let words = blob.split_whitespace().count() as u32;
    (blob, words)
}

fn max_adjustment(confidence: f64) -> f64 {
    if confidence >= 0.8 {
        0.05
    } else if confidence >= 0.5 {
        0.10
    } else {
        0.20
    }
}

fn change_threshold(confidence: f64) -> f64 {
    if confidence >= 0.8 {
        0.04
    } else {
        0.03
    }
}

fn word_factor(word_count: u32) -> f64 {
    (word_count as f64 / FULL_WEIGHT_WORDS).min(1.0)
}

/// Keeps the current categorical value unless the fresh guess differs
/// and the confidence-scaled adjustment clears the change threshold.
fn nudge<T: Copy + PartialEq>(current: T, fresh: T, confidence: f64, wf: f64) -> T {
    if fresh == current {
        return current;
    }
    let adjustment = max_adjustment(confidence) * wf;
    if adjustment >= change_threshold(confidence) {
        fresh
    } else {
        current
    }
}

/// Blends an existing term list with fresh terms.
///
/// Existing terms score `1 - weight`, fresh terms score `weight`, and a
/// term present in both earns the sum. Result is sorted by score and
/// truncated to the existing list's length, keeping array size stable
/// across refinements.
fn blend_terms(existing: &[String], fresh: &[String], confidence: f64, wf: f64) -> Vec<String> {
    let weight = max_adjustment(confidence) * wf;

    let mut scored: Vec<(String, f64)> = existing
        .iter()
        .map(|term| (term.clone(), 1.0 - weight))
        .collect();
    for term in fresh {
        if let Some(entry) = scored.iter_mut().find(|(t, _)| t == term) {
            entry.1 += weight;
        } else {
            scored.push((term.clone(), weight));
        }
    }

    // Stable sort keeps existing-list order among equal scores.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(existing.len());
    scored.into_iter().map(|(term, _)| term).collect()
}

fn array_change_percent(old: &[String], new: &[String]) -> i8 {
    if new.is_empty() {
        return 0;
    }
    let added = new.iter().filter(|term| !old.contains(term)).count();
    ((100 * added) / new.len()) as i8
}

fn categorical_change(
    attribute: Attribute,
    old: &impl Serialize,
    new: &impl Serialize,
    changes: &mut Vec<AttributeChange>,
) {
    let old_value = serde_json::json!(old);
    let new_value = serde_json::json!(new);
    if old_value != new_value {
        changes.push(AttributeChange {
            attribute,
            old_value,
            new_value,
            change_percent: 100,
        });
    }
}

fn array_change(
    attribute: Attribute,
    old: &[String],
    new: &[String],
    changes: &mut Vec<AttributeChange>,
) {
    if old != new {
        changes.push(AttributeChange {
            attribute,
            old_value: serde_json::json!(old),
            new_value: serde_json::json!(new),
            change_percent: array_change_percent(old, new),
        });
    }
}

/// Applies one refinement pass and returns the updated profile with a
/// delta report.
///
/// Works on a clone of `profile`; the caller's value is untouched, so a
/// failed persist leaves no partial update behind. The `fresh` guess is
/// normalized before use. With zero analyzed words every adjustment and
/// confidence increase collapses to nothing.
pub fn refine_profile(
    profile: &StyleProfile,
    fresh: WritingStyle,
    word_count: u32,
    now: Timestamp,
) -> (StyleProfile, DeltaReport) {
    let fresh = fresh.sanitized();
    let mut updated = profile.clone();
    let wf = word_factor(word_count);
    let old_overall = profile.confidence;

    let writing = &profile.writing;
    updated.writing.tone = nudge(
        writing.tone,
        fresh.tone,
        profile.attribute_confidence(Attribute::Tone),
        wf,
    );
    updated.writing.formality = nudge(
        writing.formality,
        fresh.formality,
        profile.attribute_confidence(Attribute::Formality),
        wf,
    );
    updated.writing.sentence_length = nudge(
        writing.sentence_length,
        fresh.sentence_length,
        profile.attribute_confidence(Attribute::SentenceLength),
        wf,
    );
    updated.writing.vocabulary = blend_terms(
        &writing.vocabulary,
        &fresh.vocabulary,
        profile.attribute_confidence(Attribute::Vocabulary),
        wf,
    );
    updated.writing.avoidance = blend_terms(
        &writing.avoidance,
        &fresh.avoidance,
        profile.attribute_confidence(Attribute::Avoidance),
        wf,
    );

    for attribute in Attribute::all() {
        let conf = profile.attribute_confidence(attribute);
        let grown = conf + BASE_INCREASE * wf * (1.0 - conf);
        updated
            .attribute_confidence
            .insert(attribute, grown.min(CONFIDENCE_CAP));
    }
    let total: f64 = Attribute::all()
        .iter()
        .map(|a| updated.attribute_confidence(*a))
        .sum();
    updated.confidence = round2(total / Attribute::all().len() as f64);

    *updated
        .sample_counts
        .entry(CONVERSATION_WORDS_KEY.to_string())
        .or_insert(0) += word_count;
    updated.learning.last_refinement = Some(now);
    updated.learning.total_refinements += 1;
    updated.learning.words_from_conversations += word_count;
    updated.version += 1;
    updated.last_updated = now;

    let mut changes = Vec::new();
    categorical_change(Attribute::Tone, &writing.tone, &updated.writing.tone, &mut changes);
    categorical_change(
        Attribute::Formality,
        &writing.formality,
        &updated.writing.formality,
        &mut changes,
    );
    categorical_change(
        Attribute::SentenceLength,
        &writing.sentence_length,
        &updated.writing.sentence_length,
        &mut changes,
    );
    array_change(
        Attribute::Vocabulary,
        &writing.vocabulary,
        &updated.writing.vocabulary,
        &mut changes,
    );
    array_change(
        Attribute::Avoidance,
        &writing.avoidance,
        &updated.writing.avoidance,
        &mut changes,
    );

    let report = DeltaReport {
        changes,
        words_analyzed: word_count,
        confidence_change: round2(updated.confidence - old_overall),
        timestamp: now,
    };

    (updated, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::style::merge::merge_writing_styles;
    use crate::domain::style::sample::{SourceSample, SourceType};
    use crate::domain::style::writing_style::{Formality, SentenceLength, Tone};

    fn base_profile(confidence: f64) -> StyleProfile {
        let samples = vec![SourceSample::new(
            SourceType::Gmail,
            WritingStyle {
                tone: Tone::Conversational,
                formality: Formality::Casual,
                sentence_length: SentenceLength::Short,
                vocabulary: vec!["honestly".into(), "cheers".into()],
                avoidance: vec!["corporate speak".into()],
            },
            800,
        )];
        let mut profile = StyleProfile::from_merge(
            UserId::new("user@example.com").unwrap(),
            merge_writing_styles(&samples),
            &samples,
            Timestamp::now(),
        );
        profile.confidence = confidence;
        for attribute in Attribute::all() {
            profile.attribute_confidence.insert(attribute, confidence);
        }
        profile
    }

    fn formal_guess() -> WritingStyle {
        WritingStyle {
            tone: Tone::Professional,
            formality: Formality::Formal,
            sentence_length: SentenceLength::Long,
            vocabulary: vec!["therefore".into(), "honestly".into()],
            avoidance: vec!["slang".into()],
        }
    }

    #[test]
    fn blob_joins_messages_and_counts_words() {
        let messages = vec!["hello there".to_string(), "  ".to_string(), "two more words here".to_string()];
        let (blob, words) = conversation_blob(&messages);
        assert_eq!(blob, "hello there\n\ntwo more words here");
        assert_eq!(words, 6);
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let profile = base_profile(0.6);
        let (updated, report) = refine_profile(&profile, formal_guess(), 0, Timestamp::now());

        assert_eq!(updated.writing, profile.writing);
        for attribute in Attribute::all() {
            assert_eq!(
                updated.attribute_confidence(attribute),
                profile.attribute_confidence(attribute)
            );
        }
        assert!(report.changes.is_empty());
        assert_eq!(report.confidence_change, 0.0);
        assert_eq!(updated.learning.total_refinements, 1);
    }

    #[test]
    fn low_confidence_profile_adopts_new_tone() {
        // max adjustment 0.20 at conf 0.3; 200 words scale it to 0.08,
        // clearing the 0.03 threshold.
        let profile = base_profile(0.3);
        let (updated, report) = refine_profile(&profile, formal_guess(), 200, Timestamp::now());

        assert_eq!(updated.writing.tone, Tone::Professional);
        assert!(report
            .changes
            .iter()
            .any(|c| c.attribute == Attribute::Tone && c.change_percent == 100));
    }

    #[test]
    fn high_confidence_profile_resists_small_batches() {
        // 200 words at conf 0.9: 0.05 * 0.4 = 0.02, under the 0.04 bar.
        let profile = base_profile(0.9);
        let (updated, _) = refine_profile(&profile, formal_guess(), 200, Timestamp::now());
        assert_eq!(updated.writing.tone, Tone::Conversational);
    }

    #[test]
    fn high_confidence_profile_yields_to_full_batches() {
        let profile = base_profile(0.9);
        let (updated, _) = refine_profile(&profile, formal_guess(), 600, Timestamp::now());
        assert_eq!(updated.writing.tone, Tone::Professional);
    }

    #[test]
    fn shared_vocabulary_terms_rise_in_the_blend() {
        // "honestly" appears in both lists and outranks "cheers".
        let profile = base_profile(0.3);
        let (updated, _) = refine_profile(&profile, formal_guess(), 600, Timestamp::now());

        assert_eq!(updated.writing.vocabulary.len(), 2);
        assert_eq!(updated.writing.vocabulary[0], "honestly");
    }

    #[test]
    fn array_length_is_stable_across_refinements() {
        let profile = base_profile(0.5);
        let mut guess = formal_guess();
        guess.vocabulary = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let (updated, _) = refine_profile(&profile, guess, 600, Timestamp::now());
        assert_eq!(
            updated.writing.vocabulary.len(),
            profile.writing.vocabulary.len()
        );
    }

    #[test]
    fn confidence_grows_with_diminishing_returns() {
        let profile = base_profile(0.6);
        let (first, _) = refine_profile(&profile, formal_guess(), 1000, Timestamp::now());
        let (second, _) = refine_profile(&first, formal_guess(), 1000, Timestamp::now());

        let gain1 = first.attribute_confidence(Attribute::Tone) - 0.6;
        let gain2 = second.attribute_confidence(Attribute::Tone)
            - first.attribute_confidence(Attribute::Tone);
        assert!(gain1 > gain2);
    }

    #[test]
    fn repeated_refinement_converges_below_cap() {
        let mut profile = base_profile(0.6);
        for _ in 0..200 {
            let (next, _) = refine_profile(&profile, formal_guess(), 1000, Timestamp::now());
            profile = next;
        }
        for attribute in Attribute::all() {
            let conf = profile.attribute_confidence(attribute);
            assert!(conf <= CONFIDENCE_CAP);
            assert!(conf > 0.94);
        }
    }

    #[test]
    fn caller_profile_is_never_mutated() {
        let profile = base_profile(0.3);
        let snapshot = profile.clone();
        let _ = refine_profile(&profile, formal_guess(), 600, Timestamp::now());
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn bookkeeping_accumulates_per_call() {
        let profile = base_profile(0.5);
        let now = Timestamp::now();
        let (first, _) = refine_profile(&profile, formal_guess(), 300, now);
        let (second, _) = refine_profile(&first, formal_guess(), 200, now);

        assert_eq!(second.sample_counts[CONVERSATION_WORDS_KEY], 500);
        assert_eq!(second.learning.words_from_conversations, 500);
        assert_eq!(second.learning.total_refinements, 2);
        assert_eq!(second.learning.last_refinement, Some(now));
    }
}

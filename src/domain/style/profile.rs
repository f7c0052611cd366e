//! StyleProfile aggregate root.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProfileId, Timestamp, UserId};

use super::merge::MergeOutcome;
use super::mergers::AttributeAttribution;
use super::sample::SourceSample;
use super::writing_style::{Attribute, WritingStyle};

/// Key under which refinement word counts accumulate in `sample_counts`.
pub const CONVERSATION_WORDS_KEY: &str = "conversation_words";

/// Bookkeeping for the incremental refinement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningMetadata {
    pub enabled: bool,
    pub last_refinement: Option<Timestamp>,
    pub total_refinements: u32,
    pub words_from_conversations: u32,
}

impl Default for LearningMetadata {
    fn default() -> Self {
        Self {
            enabled: true,
            last_refinement: None,
            total_refinements: 0,
            words_from_conversations: 0,
        }
    }
}

/// Persisted aggregate describing a user's writing style, its coding
/// counterpart (opaque to this core), and the confidence metadata.
///
/// Created on the first successful merge; mutated by later merges and by
/// refinement. Never deleted automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub version: u32,
    pub last_updated: Timestamp,
    pub writing: WritingStyle,
    /// Coding style subtree; carried through untouched by this core.
    #[serde(default)]
    pub coding: serde_json::Value,
    pub confidence: f64,
    /// Older stored documents predate these fields; serde defaults keep
    /// them loadable and [`StyleProfile::upgrade_legacy`] fills them in.
    #[serde(default)]
    pub attribute_confidence: BTreeMap<Attribute, f64>,
    #[serde(default)]
    pub sample_counts: BTreeMap<String, u32>,
    #[serde(default)]
    pub source_attribution: BTreeMap<Attribute, AttributeAttribution>,
    #[serde(default)]
    pub learning: LearningMetadata,
}

impl StyleProfile {
    /// Creates a profile from the first successful merge.
    pub fn from_merge(
        user_id: UserId,
        outcome: MergeOutcome,
        samples: &[SourceSample],
        now: Timestamp,
    ) -> Self {
        let mut profile = Self {
            id: ProfileId::new(),
            user_id,
            version: 1,
            last_updated: now,
            writing: WritingStyle::fallback(),
            coding: serde_json::Value::Null,
            confidence: 0.0,
            attribute_confidence: BTreeMap::new(),
            sample_counts: BTreeMap::new(),
            source_attribution: BTreeMap::new(),
            learning: LearningMetadata::default(),
        };
        profile
            .sample_counts
            .insert(CONVERSATION_WORDS_KEY.to_string(), 0);
        profile.apply_merge(outcome, samples, now);
        profile.version = 1;
        profile
    }

    /// Applies a merge outcome: replaces the writing style and
    /// attribution, accumulates per-source word counts, and bumps the
    /// version. Attribute confidence never decreases here.
    pub fn apply_merge(
        &mut self,
        outcome: MergeOutcome,
        samples: &[SourceSample],
        now: Timestamp,
    ) {
        self.writing = outcome.writing_style;
        self.source_attribution = outcome.source_attribution;
        self.confidence = outcome.confidence.max(self.confidence);

        for attribute in Attribute::all() {
            let entry = self.attribute_confidence.entry(attribute).or_insert(0.0);
            *entry = entry.max(outcome.confidence);
        }

        for sample in samples {
            let key = sample.source_type.as_str().to_string();
            *self.sample_counts.entry(key).or_insert(0) += sample.effective_word_count();
        }

        self.version += 1;
        self.last_updated = now;
    }

    /// Upgrades a stored document written before attribute-level
    /// confidence and learning metadata existed. Idempotent; must run
    /// before any merge or refine touches the profile.
    pub fn upgrade_legacy(&mut self) {
        if self.attribute_confidence.is_empty() {
            for attribute in Attribute::all() {
                self.attribute_confidence.insert(attribute, self.confidence);
            }
        }
        self.sample_counts
            .entry(CONVERSATION_WORDS_KEY.to_string())
            .or_insert(0);
    }

    /// Confidence for one attribute, defaulting to the overall score.
    pub fn attribute_confidence(&self, attribute: Attribute) -> f64 {
        self.attribute_confidence
            .get(&attribute)
            .copied()
            .unwrap_or(self.confidence)
    }
}

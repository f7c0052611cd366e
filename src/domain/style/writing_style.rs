//! WritingStyle value object and its categorical attribute types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of vocabulary terms kept in a style.
pub const VOCABULARY_CAP: usize = 4;

/// Maximum number of avoidance terms kept in a style.
pub const AVOIDANCE_CAP: usize = 3;

/// Overall tone of a writing sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Conversational,
    Professional,
    Neutral,
}

impl Tone {
    /// Parses a tone, falling back to `Neutral` for unrecognized input.
    ///
    /// Upstream analyzers are untrusted; malformed values normalize
    /// rather than reject.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "conversational" => Tone::Conversational,
            "professional" => Tone::Professional,
            "neutral" => Tone::Neutral,
            _ => Tone::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Conversational => "conversational",
            Tone::Professional => "professional",
            Tone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Incoming tone values come from untrusted callers and LLM replies, so
// deserialization routes through normalize instead of rejecting the body.
impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Tone::normalize(&value))
    }
}

/// Formality level, an ordinal scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Casual,
    Balanced,
    Formal,
}

impl Formality {
    /// Parses a formality level, falling back to `Balanced`.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "casual" => Formality::Casual,
            "balanced" => Formality::Balanced,
            "formal" => Formality::Formal,
            _ => Formality::Balanced,
        }
    }

    /// Ordinal score used by the weighted-averaging merger.
    pub fn score(&self) -> f64 {
        match self {
            Formality::Casual => 0.0,
            Formality::Balanced => 1.0,
            Formality::Formal => 2.0,
        }
    }

    /// Maps an averaged score back onto the scale.
    pub fn from_score(score: f64) -> Self {
        if score < 0.5 {
            Formality::Casual
        } else if score > 1.5 {
            Formality::Formal
        } else {
            Formality::Balanced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Casual => "casual",
            Formality::Balanced => "balanced",
            Formality::Formal => "formal",
        }
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Formality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Formality::normalize(&value))
    }
}

/// Typical sentence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceLength {
    Short,
    Medium,
    Long,
}

impl SentenceLength {
    /// Parses a sentence length, falling back to `Medium`.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "short" => SentenceLength::Short,
            "medium" => SentenceLength::Medium,
            "long" => SentenceLength::Long,
            _ => SentenceLength::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentenceLength::Short => "short",
            SentenceLength::Medium => "medium",
            SentenceLength::Long => "long",
        }
    }
}

impl fmt::Display for SentenceLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for SentenceLength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(SentenceLength::normalize(&value))
    }
}

/// The five style attributes tracked per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Tone,
    Formality,
    SentenceLength,
    Vocabulary,
    Avoidance,
}

impl Attribute {
    /// All attributes in canonical order.
    pub fn all() -> [Attribute; 5] {
        [
            Attribute::Tone,
            Attribute::Formality,
            Attribute::SentenceLength,
            Attribute::Vocabulary,
            Attribute::Avoidance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Tone => "tone",
            Attribute::Formality => "formality",
            Attribute::SentenceLength => "sentence_length",
            Attribute::Vocabulary => "vocabulary",
            Attribute::Avoidance => "avoidance",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A writing-style snapshot: three categorical attributes plus two short
/// term lists. Immutable once produced; each merge produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingStyle {
    pub tone: Tone,
    pub formality: Formality,
    pub sentence_length: SentenceLength,
    /// Signature terms, at most [`VOCABULARY_CAP`].
    pub vocabulary: Vec<String>,
    /// Terms the author avoids, at most [`AVOIDANCE_CAP`]; `["none"]` when empty.
    pub avoidance: Vec<String>,
}

impl WritingStyle {
    /// The fixed fallback profile used when no usable samples exist.
    pub fn fallback() -> Self {
        Self {
            tone: Tone::Neutral,
            formality: Formality::Balanced,
            sentence_length: SentenceLength::Medium,
            vocabulary: Vec::new(),
            avoidance: vec!["none".to_string()],
        }
    }

    /// The fixed guess substituted when the text analyzer fails.
    pub fn analysis_fallback() -> Self {
        Self {
            tone: Tone::Neutral,
            formality: Formality::Balanced,
            sentence_length: SentenceLength::Medium,
            vocabulary: vec!["clear".to_string(), "direct".to_string()],
            avoidance: vec!["none".to_string()],
        }
    }

    /// Returns a copy with term lists trimmed to their caps and an empty
    /// avoidance list replaced with `["none"]`.
    pub fn sanitized(mut self) -> Self {
        self.vocabulary.truncate(VOCABULARY_CAP);
        self.avoidance.truncate(AVOIDANCE_CAP);
        if self.avoidance.is_empty() {
            self.avoidance.push("none".to_string());
        }
        self
    }
}

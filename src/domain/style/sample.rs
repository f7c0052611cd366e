//! Source samples: the normalized unit of input produced by collectors.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::writing_style::WritingStyle;

/// Word count assumed when a collector did not report one.
pub const DEFAULT_WORD_COUNT: u32 = 500;

/// Where a sample came from. The collector mechanics (OAuth, scraping,
/// REST calls) live outside this core; only the tag matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Gmail,
    Text,
    Blog,
    Github,
    /// Collector types this core does not recognize still participate,
    /// at a reduced quality weight.
    #[serde(other)]
    Unknown,
}

impl SourceType {
    /// Base quality weight for this source kind.
    pub fn quality_weight(&self) -> f64 {
        match self {
            SourceType::Gmail => 1.0,
            SourceType::Text => 0.8,
            SourceType::Blog => 0.6,
            SourceType::Github => 0.7,
            SourceType::Unknown => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Gmail => "gmail",
            SourceType::Text => "text",
            SourceType::Blog => "blog",
            SourceType::Github => "github",
            SourceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One unit of collected input: extracted style attributes plus quantity
/// metadata. Read-only input to merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSample {
    pub source_type: SourceType,
    /// Extracted style; a sample without one is excluded from merging.
    pub writing_style: Option<WritingStyle>,
    /// Cleaned raw text, used only by spam detection. Collectors that
    /// discard text after extraction omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
}

impl SourceSample {
    /// Creates a sample with an extracted style.
    pub fn new(source_type: SourceType, writing_style: WritingStyle, word_count: u32) -> Self {
        Self {
            source_type,
            writing_style: Some(writing_style),
            text: None,
            word_count: Some(word_count),
        }
    }

    /// Attaches the cleaned raw text for quality checks.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Effective word count, applying the 500-word default.
    pub fn effective_word_count(&self) -> u32 {
        self.word_count.unwrap_or(DEFAULT_WORD_COUNT)
    }
}

/// A sample paired with its normalized merge weight.
///
/// Ephemeral: exists only for the duration of one merge call. Weights in
/// a batch sum to 1.0.
#[derive(Debug, Clone)]
pub struct WeightedSource {
    pub sample: SourceSample,
    pub weight: f64,
}

impl WeightedSource {
    /// Merged style of this source.
    ///
    /// Weighted sources are only built from validated samples, so the
    /// style is always present.
    pub fn style(&self) -> &WritingStyle {
        self.sample
            .writing_style
            .as_ref()
            .unwrap_or_else(|| unreachable!("weighted sources always carry a style"))
    }
}

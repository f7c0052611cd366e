//! LLM-backed style analyzer.
//!
//! Prompts the AI provider for a JSON description of the text's style,
//! then parses and normalizes the reply. Long inputs are split into word
//! chunks analyzed concurrently; a failed chunk degrades to the default
//! guess instead of failing the whole call.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;

use crate::domain::style::{
    merge_writing_styles, Formality, SentenceLength, SourceSample, SourceType, Tone, WritingStyle,
};
use crate::ports::{AiProvider, AnalysisError, CompletionRequest, StyleAnalyzer};

const SYSTEM_PROMPT: &str = "You are a writing-style analyst. \
Reply with a single JSON object and nothing else.";

/// Words per chunk for fan-out analysis.
const DEFAULT_CHUNK_WORDS: usize = 2000;

/// Style analyzer that delegates extraction to an LLM.
pub struct LlmStyleAnalyzer {
    provider: Arc<dyn AiProvider>,
    chunk_words: usize,
}

impl LlmStyleAnalyzer {
    pub fn new(provider: Arc<dyn AiProvider>) -> Self {
        Self {
            provider,
            chunk_words: DEFAULT_CHUNK_WORDS,
        }
    }

    /// Overrides the chunk size, mainly for tests.
    pub fn with_chunk_words(mut self, chunk_words: usize) -> Self {
        self.chunk_words = chunk_words.max(1);
        self
    }

    fn analysis_prompt(text: &str) -> String {
        format!(
            r#"Analyze the writing style of the text below.

Respond with JSON in exactly this shape:
{{
  "tone": "conversational" | "professional" | "neutral",
  "formality": "casual" | "balanced" | "formal",
  "sentence_length": "short" | "medium" | "long",
  "vocabulary": ["up to 4 signature words or phrases"],
  "avoidance": ["up to 3 things the author avoids, or \"none\""]
}}

Text:
{}"#,
            text
        )
    }

    /// Parses a provider reply into a normalized style.
    fn parse_style(content: &str) -> Result<WritingStyle, AnalysisError> {
        let stripped = strip_code_fences(content);
        let raw: RawStyle = serde_json::from_str(stripped)
            .map_err(|e| AnalysisError::Unparseable(e.to_string()))?;

        Ok(WritingStyle {
            tone: Tone::normalize(&raw.tone),
            formality: Formality::normalize(&raw.formality),
            sentence_length: SentenceLength::normalize(&raw.sentence_length),
            vocabulary: raw.vocabulary,
            avoidance: raw.avoidance,
        }
        .sanitized())
    }

    async fn analyze_chunk(&self, chunk: &str) -> Result<WritingStyle, AnalysisError> {
        let request = CompletionRequest::new(Self::analysis_prompt(chunk))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_temperature(0.1);

        let response = self.provider.complete(request).await?;
        Self::parse_style(&response.content)
    }
}

#[async_trait]
impl StyleAnalyzer for LlmStyleAnalyzer {
    async fn analyze(&self, text: &str) -> Result<WritingStyle, AnalysisError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let chunks = split_words(trimmed, self.chunk_words);
        if chunks.len() == 1 {
            return self.analyze_chunk(&chunks[0]).await;
        }

        let results = join_all(chunks.iter().map(|chunk| self.analyze_chunk(chunk))).await;

        if results.iter().all(|r| r.is_err()) {
            let first = results.into_iter().next();
            return match first {
                Some(Err(err)) => Err(err),
                _ => Err(AnalysisError::Unparseable("no chunk results".to_string())),
            };
        }

        // Failed chunks degrade to the default guess; the surviving
        // chunks still dominate the weighted combination.
        let samples: Vec<SourceSample> = results
            .into_iter()
            .zip(&chunks)
            .map(|(result, chunk)| {
                let style = result.unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "chunk analysis failed, using default guess");
                    WritingStyle::analysis_fallback()
                });
                let words = chunk.split_whitespace().count() as u32;
                SourceSample::new(SourceType::Text, style, words)
            })
            .collect();

        Ok(merge_writing_styles(&samples).writing_style)
    }
}

/// Splits text into chunks of at most `chunk_words` whitespace words.
fn split_words(text: &str, chunk_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= chunk_words {
        return vec![text.to_string()];
    }
    words
        .chunks(chunk_words)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Removes a surrounding markdown code fence, if present.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_end_matches('`').trim()
}

#[derive(Debug, serde::Deserialize)]
struct RawStyle {
    #[serde(default)]
    tone: String,
    #[serde(default)]
    formality: String,
    #[serde(default)]
    sentence_length: String,
    #[serde(default)]
    vocabulary: Vec<String>,
    #[serde(default)]
    avoidance: Vec<String>,
}

//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which analysis backend to use
    #[serde(default)]
    pub backend: AiBackend,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Words per analysis chunk when splitting long texts
    #[serde(default = "default_chunk_words")]
    pub chunk_words: usize,
}

/// Analysis backend selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiBackend {
    /// Canned responses, no network calls. Suitable for local development.
    #[default]
    Mock,
    Gemini,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == AiBackend::Gemini && !self.has_gemini_key() {
            return Err(ValidationError::MissingApiKey);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: AiBackend::default(),
            gemini_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            chunk_words: default_chunk_words(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_chunk_words() -> usize {
    2000
}

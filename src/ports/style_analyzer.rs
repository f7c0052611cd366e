//! Style analyzer port.
//!
//! Turns raw text into a [`WritingStyle`] guess. The production
//! implementation prompts an LLM and parses its JSON reply; failures are
//! recoverable because callers substitute a fixed default style.

use async_trait::async_trait;

use crate::domain::style::WritingStyle;

/// Port for extracting a writing style from raw text.
#[async_trait]
pub trait StyleAnalyzer: Send + Sync {
    /// Analyzes one text blob and returns a normalized style guess.
    async fn analyze(&self, text: &str) -> Result<WritingStyle, AnalysisError>;
}

/// Errors from style analysis.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The underlying provider call failed.
    #[error("provider call failed: {0}")]
    Provider(#[from] crate::ports::ai_provider::AiError),

    /// The provider replied but the reply was not usable.
    #[error("unparseable analyzer output: {0}")]
    Unparseable(String),

    /// Nothing to analyze.
    #[error("empty input text")]
    EmptyInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ai_provider::AiError;

    #[test]
    fn provider_errors_convert() {
        let err: AnalysisError = AiError::network("reset").into();
        assert!(matches!(err, AnalysisError::Provider(_)));
    }

    #[test]
    fn unparseable_displays_detail() {
        let err = AnalysisError::Unparseable("missing tone field".to_string());
        assert!(err.to_string().contains("missing tone field"));
    }
}

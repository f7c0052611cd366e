//! AI provider adapters.

pub mod gemini_provider;
pub mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAiProvider, MockError};

//! Style analysis adapters.

pub mod llm_analyzer;

pub use llm_analyzer::LlmStyleAnalyzer;

//! Ports: trait boundaries between the application core and the outside
//! world. Adapters implement these; handlers depend only on the traits.

pub mod ai_provider;
pub mod profile_store;
pub mod rate_limiter;
pub mod style_analyzer;

pub use ai_provider::{AiError, AiProvider, CompletionRequest, CompletionResponse};
pub use profile_store::{ProfileStore, StoreError};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};
pub use style_analyzer::{AnalysisError, StyleAnalyzer};

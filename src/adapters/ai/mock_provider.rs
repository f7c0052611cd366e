//! Mock AI provider for testing.
//!
//! Queues canned responses and records every request so tests can run
//! the full analyzer path without a live API.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_response(r#"{"tone":"neutral", ...}"#);
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse};

/// Mock AI provider; returns queued responses in order.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Mock error kinds for failure-path testing.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AiError::RateLimited { retry_after_secs },
            MockError::Unavailable { message } => AiError::unavailable(message),
            MockError::Network { message } => AiError::network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Number of completed calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Recorded requests, in call order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success("mock response".to_string()))
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        match self.next_response() {
            MockResponse::Success(content) => Ok(CompletionResponse {
                content,
                model: "mock-model".to_string(),
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest::new("hello")
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockAiProvider::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(provider.complete(request()).await.unwrap().content, "first");
        assert_eq!(provider.complete(request()).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_when_exhausted() {
        let provider = MockAiProvider::new();
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "mock response");
    }

    #[tokio::test]
    async fn queued_error_surfaces() {
        let provider = MockAiProvider::new().with_error(MockError::RateLimited {
            retry_after_secs: 15,
        });
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, AiError::RateLimited { retry_after_secs: 15 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAiProvider::new().with_response("ok");
        assert_eq!(provider.call_count(), 0);
        provider.complete(request()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.calls()[0].prompt, "hello");
    }
}

//! Rate limiting port.
//!
//! Fixed-window counting keyed by user and resource. Refinement calls
//! are the expensive path (each one hits the LLM), so they carry their
//! own resource key.

use async_trait::async_trait;

use crate::domain::foundation::{Timestamp, UserId};

/// Port for rate limiting operations.
///
/// Implementations must be safe for concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Checks whether a request is allowed, consuming one slot if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Clears the current window for a key, restoring full quota.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

/// Key identifying what to rate limit.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    pub identifier: String,
    pub resource: &'static str,
}

impl RateLimitKey {
    /// Per-user key for refinement calls.
    pub fn refine(user_id: &UserId) -> Self {
        Self {
            identifier: user_id.to_string(),
            resource: "profile_refine",
        }
    }

    /// Per-user key for merge calls.
    pub fn merge(user_id: &UserId) -> Self {
        Self {
            identifier: user_id.to_string(),
            resource: "profile_merge",
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Allowed; carries the remaining quota.
    Allowed(RateLimitStatus),
    /// Denied; carries retry guidance.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }
}

/// Quota snapshot for an allowed request.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: Timestamp,
}

/// Details of a denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    pub limit: u32,
    pub retry_after_secs: u32,
}

/// Errors from the rate limiter itself.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

//! HTTP DTOs for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::style::{DeltaReport, SourceSample, StyleProfile};

// Request DTOs

/// Body of POST /api/profile/merge.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeProfileRequest {
    pub user_id: String,
    pub sources: Vec<SourceSample>,
}

/// Body of POST /api/profile/refine.
#[derive(Debug, Clone, Deserialize)]
pub struct RefineProfileRequest {
    pub user_id: String,
    /// Optional starting point; when absent the stored profile is used.
    #[serde(default)]
    pub current_profile: Option<StyleProfile>,
    pub new_messages: Vec<String>,
}

// Response DTOs

/// Body of a successful refine call.
#[derive(Debug, Clone, Serialize)]
pub struct RefineProfileResponse {
    pub updated_profile: StyleProfile,
    pub delta_report: DeltaReport,
}

/// Uniform error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u32>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            retryable: false,
            retry_after_secs: None,
        }
    }

    pub fn not_found(user_id: &str) -> Self {
        Self {
            code: "PROFILE_NOT_FOUND".to_string(),
            message: format!("no profile stored for {}", user_id),
            retryable: false,
            retry_after_secs: None,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.message().to_string(),
            retryable: error.is_retryable(),
            retry_after_secs: error.retry_after_secs(),
        }
    }
}

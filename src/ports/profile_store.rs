//! Profile store port.
//!
//! Whole-document persistence keyed by user. Implementations exist for
//! in-memory (tests) and the local filesystem.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::style::StyleProfile;

/// Port for persisting style profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Loads a user's profile, if one exists.
    async fn load(&self, user_id: &UserId) -> Result<Option<StyleProfile>, StoreError>;

    /// Saves a profile, replacing any previous version.
    async fn save(&self, profile: &StyleProfile) -> Result<(), StoreError>;

    /// Deletes a user's profile. Deleting a missing profile is not an
    /// error.
    async fn delete(&self, user_id: &UserId) -> Result<(), StoreError>;
}

/// Errors from profile storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize profile: {0}")]
    Serialization(String),

    #[error("failed to deserialize stored profile: {0}")]
    Deserialization(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}

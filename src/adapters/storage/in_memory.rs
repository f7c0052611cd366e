//! In-memory profile store for tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::style::StyleProfile;
use crate::ports::{ProfileStore, StoreError};

/// Profile store backed by a HashMap. Not persistent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, StyleProfile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<StyleProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id.as_str()).cloned())
    }

    async fn save(&self, profile: &StyleProfile) -> Result<(), StoreError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.as_str().to_string(), profile.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), StoreError> {
        self.profiles.write().await.remove(user_id.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::style::{merge_writing_styles, SourceSample, SourceType, WritingStyle};

    fn profile(user: &str) -> StyleProfile {
        let samples = vec![SourceSample::new(
            SourceType::Text,
            WritingStyle::fallback(),
            500,
        )];
        StyleProfile::from_merge(
            UserId::new(user).unwrap(),
            merge_writing_styles(&samples),
            &samples,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = InMemoryProfileStore::new();
        let saved = profile("a@example.com");
        store.save(&saved).await.unwrap();

        let loaded = store
            .load(&UserId::new("a@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let store = InMemoryProfileStore::new();
        let loaded = store.load(&UserId::new("nobody").unwrap()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = InMemoryProfileStore::new();
        let user = UserId::new("a@example.com").unwrap();
        store.save(&profile("a@example.com")).await.unwrap();

        store.delete(&user).await.unwrap();
        store.delete(&user).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn save_replaces_previous_version() {
        let store = InMemoryProfileStore::new();
        let mut p = profile("a@example.com");
        store.save(&p).await.unwrap();
        p.version += 1;
        store.save(&p).await.unwrap();

        let loaded = store
            .load(&UserId::new("a@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.version, p.version);
        assert_eq!(store.len().await, 1);
    }
}

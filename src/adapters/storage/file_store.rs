//! Filesystem profile store.
//!
//! One JSON document per user under a base directory. Writes go through
//! a temp file and rename so a crash mid-write never leaves a corrupt
//! profile behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::domain::style::StyleProfile;
use crate::ports::{ProfileStore, StoreError};

/// Profile store backed by local JSON files.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    base_dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn profile_path(&self, user_id: &UserId) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", sanitize_filename(user_id.as_str())))
    }

    async fn ensure_base_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }
}

/// Maps a user id onto a filesystem-safe name.
fn sanitize_filename(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<StyleProfile>, StoreError> {
        let path = self.profile_path(user_id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let profile = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;
        Ok(Some(profile))
    }

    async fn save(&self, profile: &StyleProfile) -> Result<(), StoreError> {
        self.ensure_base_dir().await?;

        let path = self.profile_path(&profile.user_id);
        let json = serde_json::to_vec_pretty(profile)?;

        let tmp_path = temp_path(&path);
        fs::write(&tmp_path, &json).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), StoreError> {
        let path = self.profile_path(user_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::style::{merge_writing_styles, SourceSample, SourceType, WritingStyle};
    use tempfile::tempdir;

    fn profile(user: &str) -> StyleProfile {
        let samples = vec![SourceSample::new(
            SourceType::Gmail,
            WritingStyle::fallback(),
            700,
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
        let dir = tempdir().unwrap();
        let store = FileProfileStore::new(dir.path());
        let saved = profile("user@example.com");

        store.save(&saved).await.unwrap();
        let loaded = store
            .load(&UserId::new("user@example.com").unwrap())
            .await
            .unwrap();

        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileProfileStore::new(dir.path());
        let loaded = store
            .load(&UserId::new("nobody@example.com").unwrap())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn delete_missing_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = FileProfileStore::new(dir.path());
        store
            .delete(&UserId::new("nobody@example.com").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_reports_deserialization_error() {
        let dir = tempdir().unwrap();
        let store = FileProfileStore::new(dir.path());
        let user = UserId::new("user@example.com").unwrap();

        tokio::fs::write(store.profile_path(&user), b"not json")
            .await
            .unwrap();

        let err = store.load(&user).await.unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("a@b.com"), "a_b_com");
        assert_eq!(sanitize_filename("user-123"), "user-123");
    }
}

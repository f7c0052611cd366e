//! GetProfile - query handler.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::style::StyleProfile;
use crate::ports::ProfileStore;

use super::storage_error;

/// Query for a user's stored profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// Handler for profile lookups.
pub struct GetProfileHandler {
    store: Arc<dyn ProfileStore>,
}

impl GetProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Loads the profile, upgrading legacy documents on the way out.
    pub async fn handle(&self, query: GetProfileQuery) -> Result<Option<StyleProfile>, DomainError> {
        let profile = self
            .store
            .load(&query.user_id)
            .await
            .map_err(storage_error)?;

        Ok(profile.map(|mut p| {
            p.upgrade_legacy();
            p
        }))
    }
}

//! ResetProfile - command handler for deleting a stored profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ProfileStore;

use super::storage_error;

/// Command to delete a user's profile.
#[derive(Debug, Clone)]
pub struct ResetProfileCommand {
    pub user_id: UserId,
}

/// Handler for profile deletion.
pub struct ResetProfileHandler {
    store: Arc<dyn ProfileStore>,
}

impl ResetProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Deletes the profile. Deleting a missing profile succeeds.
    pub async fn handle(&self, cmd: ResetProfileCommand) -> Result<(), DomainError> {
        self.store
            .delete(&cmd.user_id)
            .await
            .map_err(storage_error)?;
        tracing::info!(user_id = %cmd.user_id, "deleted profile");
        Ok(())
    }
}

//! MergeProfile - command handler for the multi-source merge.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::style::{merge_writing_styles, SourceSample, StyleProfile};
use crate::ports::{ProfileStore, RateLimitKey, RateLimitResult, RateLimiter};

use super::{limiter_error, storage_error};

/// Upper bound on samples per merge request.
pub const MAX_SAMPLES: usize = 64;

/// Command to merge source samples into a user's profile.
#[derive(Debug, Clone)]
pub struct MergeProfileCommand {
    pub user_id: UserId,
    pub samples: Vec<SourceSample>,
}

/// Handler for profile merges.
pub struct MergeProfileHandler {
    store: Arc<dyn ProfileStore>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl MergeProfileHandler {
    pub fn new(store: Arc<dyn ProfileStore>, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            store,
            rate_limiter,
        }
    }

    /// Merges the samples and persists the resulting profile.
    ///
    /// An empty or unusable batch still succeeds with the fixed fallback
    /// profile. The stored profile is only replaced after the merge
    /// completes, so a failure leaves the previous version intact.
    pub async fn handle(&self, cmd: MergeProfileCommand) -> Result<StyleProfile, DomainError> {
        if cmd.samples.len() > MAX_SAMPLES {
            return Err(DomainError::validation(
                "sources",
                format!("at most {} samples per merge", MAX_SAMPLES),
            ));
        }

        let check = self
            .rate_limiter
            .check(RateLimitKey::merge(&cmd.user_id))
            .await
            .map_err(limiter_error)?;
        if let RateLimitResult::Denied(denied) = check {
            return Err(DomainError::rate_limited(denied.retry_after_secs));
        }

        let outcome = merge_writing_styles(&cmd.samples);
        tracing::info!(
            user_id = %cmd.user_id,
            sources = outcome.sources_used.len(),
            confidence = outcome.confidence,
            "merged source samples"
        );

        let now = Timestamp::now();
        let profile = match self.store.load(&cmd.user_id).await.map_err(storage_error)? {
            Some(mut existing) => {
                existing.upgrade_legacy();
                existing.apply_merge(outcome, &cmd.samples, now);
                existing
            }
            None => StyleProfile::from_merge(cmd.user_id.clone(), outcome, &cmd.samples, now),
        };

        self.store.save(&profile).await.map_err(storage_error)?;
        Ok(profile)
    }
}

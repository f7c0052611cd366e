//! RefineProfile - command handler for conversation-driven refinement.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::style::{
    conversation_blob, refine_profile, DeltaReport, StyleProfile, WritingStyle,
};
use crate::ports::{
    ProfileStore, RateLimitKey, RateLimitResult, RateLimiter, StyleAnalyzer,
};

use super::{limiter_error, storage_error};

/// Command to refine a profile from new conversation messages.
///
/// `current_profile` is optional; when absent the stored profile is
/// used. Supplying it lets callers refine a profile they hold without a
/// prior round-trip.
#[derive(Debug, Clone)]
pub struct RefineProfileCommand {
    pub user_id: UserId,
    pub current_profile: Option<StyleProfile>,
    pub new_messages: Vec<String>,
}

/// Result of a successful refinement.
#[derive(Debug, Clone)]
pub struct RefineProfileResult {
    pub profile: StyleProfile,
    pub delta: DeltaReport,
}

/// Handler for profile refinement.
pub struct RefineProfileHandler {
    store: Arc<dyn ProfileStore>,
    analyzer: Arc<dyn StyleAnalyzer>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl RefineProfileHandler {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        analyzer: Arc<dyn StyleAnalyzer>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            store,
            analyzer,
            rate_limiter,
        }
    }

    /// Refines and persists the profile, returning it with a delta
    /// report.
    ///
    /// Analysis failures degrade to a fixed default guess rather than
    /// failing the call. The stored profile is replaced only after the
    /// whole refinement succeeds.
    pub async fn handle(
        &self,
        cmd: RefineProfileCommand,
    ) -> Result<RefineProfileResult, DomainError> {
        let check = self
            .rate_limiter
            .check(RateLimitKey::refine(&cmd.user_id))
            .await
            .map_err(limiter_error)?;
        if let RateLimitResult::Denied(denied) = check {
            return Err(DomainError::rate_limited(denied.retry_after_secs));
        }

        let mut profile = match cmd.current_profile {
            Some(profile) => profile,
            None => self
                .store
                .load(&cmd.user_id)
                .await
                .map_err(storage_error)?
                .ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::ProfileNotFound,
                        format!("no profile stored for {}", cmd.user_id),
                    )
                })?,
        };
        profile.upgrade_legacy();

        let (blob, word_count) = conversation_blob(&cmd.new_messages);

        let fresh = if word_count == 0 {
            // Nothing to analyze; the zero word factor nullifies every
            // adjustment anyway.
            WritingStyle::analysis_fallback()
        } else {
            match self.analyzer.analyze(&blob).await {
                Ok(style) => style,
                Err(err) => {
                    tracing::warn!(
                        user_id = %cmd.user_id,
                        error = %err,
                        "style analysis failed, refining with default guess"
                    );
                    WritingStyle::analysis_fallback()
                }
            }
        };

        let (updated, delta) = refine_profile(&profile, fresh, word_count, Timestamp::now());

        self.store.save(&updated).await.map_err(storage_error)?;

        tracing::info!(
            user_id = %cmd.user_id,
            words = word_count,
            changes = delta.changes.len(),
            confidence_change = delta.confidence_change,
            "refined profile"
        );

        Ok(RefineProfileResult {
            profile: updated,
            delta,
        })
    }
}

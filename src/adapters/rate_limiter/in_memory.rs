//! In-memory rate limiter.
//!
//! Fixed-window counter over a HashMap. Suitable for a single-process
//! deployment; a shared backend would be needed behind a load balancer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

/// Limit configuration for the fixed window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub requests_per_window: u32,
    pub window_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 10,
            window_secs: 60,
        }
    }
}

#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
}

/// Fixed-window in-memory rate limiter.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<RateLimitKey, WindowState>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let limit = self.config.requests_per_window;
        let window_secs = self.config.window_secs as u64;
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;
        let state = windows.entry(key).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now >= state.window_start + window_secs {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after = (state.window_start + window_secs).saturating_sub(now) as u32;
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
            }));
        }

        state.count += 1;
        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(state.count),
            reset_at: Timestamp::from_unix_secs(state.window_start + window_secs),
        }))
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn key() -> RateLimitKey {
        RateLimitKey::refine(&UserId::new("test-user").unwrap())
    }

    #[tokio::test]
    async fn allows_requests_within_limit() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 5,
            window_secs: 60,
        });

        for _ in 0..5 {
            assert!(limiter.check(key()).await.unwrap().is_allowed());
        }
    }

    #[tokio::test]
    async fn denies_at_limit_with_retry_hint() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 2,
            window_secs: 60,
        });

        limiter.check(key()).await.unwrap();
        limiter.check(key()).await.unwrap();

        match limiter.check(key()).await.unwrap() {
            RateLimitResult::Denied(denied) => {
                assert_eq!(denied.limit, 2);
                assert!(denied.retry_after_secs >= 1);
            }
            RateLimitResult::Allowed(_) => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn reset_restores_quota() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 1,
            window_secs: 60,
        });

        limiter.check(key()).await.unwrap();
        assert!(!limiter.check(key()).await.unwrap().is_allowed());

        limiter.reset(key()).await.unwrap();
        assert!(limiter.check(key()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn different_users_have_independent_windows() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 1,
            window_secs: 60,
        });

        let other = RateLimitKey::refine(&UserId::new("someone-else").unwrap());
        limiter.check(key()).await.unwrap();
        assert!(!limiter.check(key()).await.unwrap().is_allowed());
        assert!(limiter.check(other).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn merge_and_refine_resources_are_independent() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 1,
            window_secs: 60,
        });

        let user = UserId::new("test-user").unwrap();
        limiter.check(RateLimitKey::refine(&user)).await.unwrap();
        assert!(!limiter
            .check(RateLimitKey::refine(&user))
            .await
            .unwrap()
            .is_allowed());
        assert!(limiter
            .check(RateLimitKey::merge(&user))
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn remaining_decrements() {
        let limiter = InMemoryRateLimiter::new(RateLimitConfig {
            requests_per_window: 3,
            window_secs: 60,
        });

        for expected in (0..3).rev() {
            match limiter.check(key()).await.unwrap() {
                RateLimitResult::Allowed(status) => assert_eq!(status.remaining, expected),
                RateLimitResult::Denied(_) => panic!("expected allow"),
            }
        }
    }
}

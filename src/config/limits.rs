//! Rate limit configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Rate limit configuration for the profile endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Requests allowed per window, per user and resource
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl LimitsConfig {
    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_window == 0 || self.window_secs == 0 {
            return Err(ValidationError::InvalidRateLimitWindow);
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_requests_per_window() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_defaults() {
        let config = LimitsConfig::default();
        assert_eq!(config.requests_per_window, 10);
        assert_eq!(config.window_secs, 60);
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = LimitsConfig {
            window_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LimitsConfig {
            requests_per_window: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

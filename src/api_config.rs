//! # Drink Database Client Configuration Module
//!
//! This module defines configuration structures for the external drink
//! database client, including request limits and retry settings.

// Constants for the external client configuration
pub const DEFAULT_BASE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Retry configuration for outbound requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 500,  // 0.5 seconds
            max_retry_delay_ms: 5000,  // 5 seconds
        }
    }
}

/// Configuration for the external drink database client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the drink database API
    pub base_url: String,
    /// Timeout for a single request in seconds
    pub request_timeout_secs: u64,
    /// Retry and backoff configuration
    pub retry: RetryConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            retry: RetryConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Configuration pointing at a non-default API endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

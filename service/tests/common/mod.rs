//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock wrapper for stubbing the bills API
//! - [`factories`] - JSON builders for API payloads

#![allow(dead_code)]

pub mod factories;
pub mod http_mock;

use billwatch::api::{HttpBillsClient, RetryPolicy};
use std::time::Duration;

/// Retry schedule with the production shape but millisecond delays.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

/// Client pointed at `base_url` with fast retries.
pub fn test_client(base_url: String) -> HttpBillsClient {
    HttpBillsClient::new(base_url).with_retry_policy(fast_retry())
}

//! Hooks invoked around every outbound API request.
//!
//! The HTTP client reports each attempt to a [`RequestObserver`]. Observers
//! only see borrowed data and return nothing, so they cannot change what the
//! client returns.

use super::client::ApiError;

/// One request attempt as seen by an observer.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub method: &'static str,
    pub url: &'a str,
    /// 1 for the first attempt, incremented on each retry.
    pub attempt: u32,
    /// `None` when the request failed before a response arrived.
    pub status: Option<u16>,
    /// Response body, when one was read.
    pub payload: Option<&'a str>,
}

/// Observer notified after each request attempt settles.
pub trait RequestObserver: Send + Sync {
    /// Called for every 2xx response that decoded cleanly.
    fn on_response(&self, exchange: &Exchange<'_>);

    /// Called for every failed attempt, including ones that will be retried
    /// and 2xx bodies that failed to decode.
    fn on_error(&self, exchange: &Exchange<'_>, error: &ApiError);
}

/// Default observer: emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_response(&self, exchange: &Exchange<'_>) {
        tracing::debug!(
            method = exchange.method,
            url = exchange.url,
            attempt = exchange.attempt,
            status = exchange.status,
            payload = exchange.payload.unwrap_or_default(),
            "API response"
        );
    }

    fn on_error(&self, exchange: &Exchange<'_>, error: &ApiError) {
        tracing::warn!(
            method = exchange.method,
            url = exchange.url,
            attempt = exchange.attempt,
            status = exchange.status,
            payload = exchange.payload.unwrap_or_default(),
            error = %error,
            "API error"
        );
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
pub mod recording {
    //! Observer that keeps every event for assertions.

    use super::{ApiError, Exchange, RequestObserver};
    use std::sync::Mutex;

    /// Owned copy of one observed attempt.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedExchange {
        pub method: String,
        pub url: String,
        pub attempt: u32,
        pub status: Option<u16>,
        pub payload: Option<String>,
        /// `Some(message)` for errors, `None` for successful responses.
        pub error: Option<String>,
    }

    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        events: Mutex<Vec<RecordedExchange>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<RecordedExchange> {
            self.events.lock().unwrap().clone()
        }

        fn record(&self, exchange: &Exchange<'_>, error: Option<String>) {
            self.events.lock().unwrap().push(RecordedExchange {
                method: exchange.method.to_string(),
                url: exchange.url.to_string(),
                attempt: exchange.attempt,
                status: exchange.status,
                payload: exchange.payload.map(String::from),
                error,
            });
        }
    }

    impl RequestObserver for RecordingObserver {
        fn on_response(&self, exchange: &Exchange<'_>) {
            self.record(exchange, None);
        }

        fn on_error(&self, exchange: &Exchange<'_>, error: &ApiError) {
            self.record(exchange, Some(error.to_string()));
        }
    }
}

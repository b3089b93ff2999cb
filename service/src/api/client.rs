//! Bills API client.
//!
//! [`BillsApi`] is the contract the rest of the crate programs against. Two
//! strategies implement it:
//!
//! - [`HttpBillsClient`] talks to the live `/api/v1` REST API
//! - [`FixtureSource`](super::FixtureSource) serves the bundled mock dataset
//!
//! One of them is chosen at startup (see [`crate::source`]), so nothing below
//! the composition root branches on mock mode.
//!
//! # Example
//!
//! ```ignore
//! use billwatch::api::{BillsApi, HttpBillsClient};
//!
//! let client = HttpBillsClient::new("http://localhost:8000");
//! let bill = client.get_bill(118, "HR", 2811).await?;
//! println!("{}: {}", bill.label(), bill.latest_action_text);
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_retry::RetryIf;

use super::observer::{Exchange, RequestObserver, TracingObserver};
use super::retry::RetryPolicy;
use super::types::{AiSummary, Amendment, Bill, CompositeId, ErrorDetail, SummariesResponse};

/// Number of summaries fetched when the caller has no preference.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Errors that can occur when calling the bills API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, reading the body)
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// No bill, amendment or resource with the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-2xx response other than 404
    #[error("Server error: {status} - {detail}")]
    Server { status: u16, detail: String },

    /// Body could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Server { status, .. } => *status >= 500 || *status == 429,
            Self::NotFound(_) | Self::Malformed(_) => false,
        }
    }
}

/// The four read operations of the bills dashboard.
#[async_trait]
pub trait BillsApi: Send + Sync {
    /// Get a bill by `(congress, type, number)`.
    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        bill_number: u32,
    ) -> Result<Bill, ApiError>;

    /// Get an amendment by `(congress, type, number)`.
    async fn get_amendment(
        &self,
        congress: u32,
        amendment_type: &str,
        amendment_number: u32,
    ) -> Result<Amendment, ApiError>;

    /// At most `limit` most-recently-updated summaries, in upstream order.
    ///
    /// A payload without the `summaries` field yields an empty list.
    async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError>;

    /// Errors the backend hit while ingesting data.
    async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError>;
}

#[async_trait]
impl<T: BillsApi + ?Sized> BillsApi for Arc<T> {
    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        bill_number: u32,
    ) -> Result<Bill, ApiError> {
        (**self).get_bill(congress, bill_type, bill_number).await
    }

    async fn get_amendment(
        &self,
        congress: u32,
        amendment_type: &str,
        amendment_number: u32,
    ) -> Result<Amendment, ApiError> {
        (**self)
            .get_amendment(congress, amendment_type, amendment_number)
            .await
    }

    async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError> {
        (**self).get_recent_summaries(limit).await
    }

    async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError> {
        (**self).get_processing_errors().await
    }
}

/// Error body returned by the API on failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP-based implementation of `BillsApi`.
///
/// Every attempt is reported to the configured [`RequestObserver`];
/// transient failures are retried according to the [`RetryPolicy`].
pub struct HttpBillsClient {
    client: reqwest::Client,
    base_url: String,
    observer: Arc<dyn RequestObserver>,
    retry: RetryPolicy,
}

impl HttpBillsClient {
    /// Create a new client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, proxies).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            observer: Arc::new(TracingObserver),
            retry: RetryPolicy::default(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Replace the request observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `url` with retries and decode the 2xx body as `T`.
    ///
    /// A 404 becomes `ApiError::NotFound(resource)`; an undecodable body
    /// becomes `ApiError::Malformed` and is not retried.
    async fn fetch_json<T>(&self, url: &str, resource: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let mut attempt = 0u32;
        RetryIf::spawn(
            self.retry.delays(),
            move || {
                attempt += 1;
                self.fetch_once(url, resource, attempt)
            },
            ApiError::is_transient,
        )
        .await
    }

    async fn fetch_once<T>(&self, url: &str, resource: &str, attempt: u32) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let mut exchange = Exchange {
            method: "GET",
            url,
            attempt,
            status: None,
            payload: None,
        };

        let response = match self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = ApiError::Network(err);
                self.observer.on_error(&exchange, &err);
                return Err(err);
            }
        };

        let status = response.status();
        exchange.status = Some(status.as_u16());

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                let err = ApiError::Network(err);
                self.observer.on_error(&exchange, &err);
                return Err(err);
            }
        };
        exchange.payload = Some(&body);

        let err = if status.is_success() {
            match serde_json::from_str(&body) {
                Ok(value) => {
                    self.observer.on_response(&exchange);
                    return Ok(value);
                }
                Err(e) => ApiError::Malformed(format!("{resource}: {e}")),
            }
        } else if status == reqwest::StatusCode::NOT_FOUND {
            ApiError::NotFound(resource.to_string())
        } else {
            ApiError::Server {
                status: status.as_u16(),
                detail: error_detail(&body, status),
            }
        };
        self.observer.on_error(&exchange, &err);
        Err(err)
    }
}

/// Prefer the `{ "detail": ... }` message, fall back to the raw body.
fn error_detail(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(ErrorBody { detail }) = serde_json::from_str(body) {
        return detail;
    }
    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl BillsApi for HttpBillsClient {
    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        bill_number: u32,
    ) -> Result<Bill, ApiError> {
        let url = format!(
            "{}/api/v1/bills/{}/{}/{}",
            self.base_url,
            congress,
            urlencoding::encode(bill_type),
            bill_number
        );
        let id = CompositeId::new(congress, bill_type, bill_number);
        self.fetch_json(&url, &id.to_string()).await
    }

    async fn get_amendment(
        &self,
        congress: u32,
        amendment_type: &str,
        amendment_number: u32,
    ) -> Result<Amendment, ApiError> {
        let url = format!(
            "{}/api/v1/amendments/{}/{}/{}",
            self.base_url,
            congress,
            urlencoding::encode(amendment_type),
            amendment_number
        );
        let id = CompositeId::new(congress, amendment_type, amendment_number);
        self.fetch_json(&url, &id.to_string()).await
    }

    async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError> {
        let url = format!("{}/api/v1/summaries/recent?limit={limit}", self.base_url);

        let response: SummariesResponse = self.fetch_json(&url, "recent summaries").await?;
        let mut summaries = response.summaries;
        summaries.truncate(limit);

        tracing::debug!(count = summaries.len(), limit, "fetched recent summaries");
        Ok(summaries)
    }

    async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError> {
        let url = format!("{}/api/v1/status/errors", self.base_url);
        self.fetch_json(&url, "processing errors").await
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{AiSummary, Amendment, ApiError, Bill, BillsApi, CompositeId, ErrorDetail};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of `BillsApi` for unit tests.
    ///
    /// Configure responses with `set_*_result` methods. Each result is
    /// returned once; later calls fall back to `NotFound` (lookups) or an
    /// empty list (listings). Every call is recorded in `calls()`.
    pub struct MockBillsApi {
        bill_result: Mutex<Option<Result<Bill, ApiError>>>,
        amendment_result: Mutex<Option<Result<Amendment, ApiError>>>,
        summaries_result: Mutex<Option<Result<Vec<AiSummary>, ApiError>>>,
        errors_result: Mutex<Option<Result<Vec<ErrorDetail>, ApiError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockBillsApi {
        pub fn new() -> Self {
            Self {
                bill_result: Mutex::new(None),
                amendment_result: Mutex::new(None),
                summaries_result: Mutex::new(None),
                errors_result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn set_bill_result(&self, result: Result<Bill, ApiError>) {
            *self.bill_result.lock().unwrap() = Some(result);
        }

        pub fn set_amendment_result(&self, result: Result<Amendment, ApiError>) {
            *self.amendment_result.lock().unwrap() = Some(result);
        }

        pub fn set_summaries_result(&self, result: Result<Vec<AiSummary>, ApiError>) {
            *self.summaries_result.lock().unwrap() = Some(result);
        }

        pub fn set_errors_result(&self, result: Result<Vec<ErrorDetail>, ApiError>) {
            *self.errors_result.lock().unwrap() = Some(result);
        }

        /// Calls made so far, e.g. `["bill 118/HR/2811", "recent 5"]`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Default for MockBillsApi {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl BillsApi for MockBillsApi {
        async fn get_bill(
            &self,
            congress: u32,
            bill_type: &str,
            bill_number: u32,
        ) -> Result<Bill, ApiError> {
            let id = CompositeId::new(congress, bill_type, bill_number);
            self.record(format!("bill {id}"));

            self.bill_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ApiError::NotFound(id.to_string())))
        }

        async fn get_amendment(
            &self,
            congress: u32,
            amendment_type: &str,
            amendment_number: u32,
        ) -> Result<Amendment, ApiError> {
            let id = CompositeId::new(congress, amendment_type, amendment_number);
            self.record(format!("amendment {id}"));

            self.amendment_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(ApiError::NotFound(id.to_string())))
        }

        async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError> {
            self.record(format!("recent {limit}"));

            self.summaries_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError> {
            self.record("errors".to_string());

            self.errors_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}

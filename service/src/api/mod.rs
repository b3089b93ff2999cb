//! Bills API access.
//!
//! # Architecture
//!
//! - [`BillsApi`] - Trait defining the four read operations
//! - [`HttpBillsClient`] - Live implementation over reqwest, with retries
//! - [`FixtureSource`] - Bundled mock dataset for running without a backend
//! - [`RequestObserver`] - Hook called around every HTTP attempt
//! - [`mock::MockBillsApi`] - Scriptable mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use billwatch::api::mock::MockBillsApi;
//!
//! let mock = MockBillsApi::new();
//! mock.set_bill_result(Ok(bill));
//! let rows = build_board(&mock, 5).await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/api/v1/bills/118/HR/2811")
//!     .respond_with_json(json!({ "congress_number": 118, ... }))
//!     .mount()
//!     .await;
//!
//! let client = HttpBillsClient::new(server.url());
//! let bill = client.get_bill(118, "HR", 2811).await?;
//! ```

mod client;
mod fixtures;
mod observer;
mod retry;
mod types;

pub use client::{ApiError, BillsApi, HttpBillsClient, DEFAULT_RECENT_LIMIT};
pub use fixtures::{FixtureSource, MockDataset};
pub use observer::{Exchange, RequestObserver, TracingObserver};
pub use retry::RetryPolicy;
pub use types::{
    AiSummary, Amendment, Bill, CompositeId, ErrorDetail, Sentiment, SummariesResponse,
    TargetRef, TargetRefError, TargetType,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;

#[cfg(any(test, feature = "test-utils"))]
pub use observer::recording;

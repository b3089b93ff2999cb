//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing of the bills API.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/api/v1/status/errors")
//!         .respond_with_json(json!([]))
//!         .mount()
//!         .await;
//!
//!     let client = HttpBillsClient::new(server.url());
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)` or `.respond_with_body(string)`
//! - **Error response**: `.respond_with_status(500).with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`
//! - **Flaky upstream**: `.up_to_n_times(2)` on a failing stub mounted before a succeeding one

#![allow(dead_code)]

use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Underlying wiremock server, for matchers this wrapper lacks.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Panics if any `expect_times` expectation was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Start stubbing a GET request to `path`.
    pub fn expect_get(&self, request_path: &str) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            builder: Mock::given(method("GET")).and(path(request_path)),
            status: 200,
            body: StubBody::Empty,
            delay: None,
            times: None,
            up_to: None,
        }
    }
}

enum StubBody {
    Empty,
    Json(Value),
    Text(String),
}

/// Builder for a single stubbed response.
pub struct StubBuilder<'a> {
    server: &'a MockServer,
    builder: MockBuilder,
    status: u16,
    body: StubBody,
    delay: Option<Duration>,
    times: Option<u64>,
    up_to: Option<u64>,
}

impl StubBuilder<'_> {
    /// Only match requests carrying this header value.
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.builder = self.builder.and(header(name, value));
        self
    }

    /// Only match requests carrying this query parameter.
    pub fn with_query(mut self, name: &'static str, value: &'static str) -> Self {
        self.builder = self.builder.and(query_param(name, value));
        self
    }

    /// Respond 200 with a JSON body.
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.body = StubBody::Json(body);
        self
    }

    /// Respond 200 with a raw text body.
    pub fn respond_with_body(mut self, body: impl Into<String>) -> Self {
        self.body = StubBody::Text(body.into());
        self
    }

    /// Respond with this status code.
    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Attach a JSON body to a non-200 response.
    pub fn with_json_response(self, body: Value) -> Self {
        self.respond_with_json(body)
    }

    /// Hold the response back for `delay`.
    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Require exactly `n` matching requests (checked by `verify`).
    pub fn expect_times(mut self, n: u64) -> Self {
        self.times = Some(n);
        self
    }

    /// Stop matching after `n` requests so a later stub takes over.
    pub fn up_to_n_times(mut self, n: u64) -> Self {
        self.up_to = Some(n);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        template = match self.body {
            StubBody::Empty => template,
            StubBody::Json(body) => template.set_body_json(body),
            StubBody::Text(body) => template.set_body_string(body),
        };
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = self.builder.respond_with(template);
        if let Some(n) = self.up_to {
            mock = mock.up_to_n_times(n);
        }
        if let Some(n) = self.times {
            mock = mock.expect(n);
        }
        mock.mount(self.server).await;
    }
}

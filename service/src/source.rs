//! Startup selection of the data source strategy.

use std::sync::Arc;

use crate::api::{ApiError, BillsApi, FixtureSource, HttpBillsClient, TracingObserver};
use crate::cache::CachedSource;
use crate::config::Config;

/// Build the `BillsApi` the rest of the program uses.
///
/// `api.mock_mode` picks the bundled dataset or the live HTTP client. This is
/// the only place the flag is read. Either way the result is wrapped in the
/// query cache.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built or the bundled
/// dataset fails to parse.
pub fn build_source(config: &Config) -> Result<Arc<dyn BillsApi>, ApiError> {
    let inner: Arc<dyn BillsApi> = if config.api.mock_mode {
        tracing::info!("mock mode enabled - serving bundled dataset");
        Arc::new(FixtureSource::bundled()?)
    } else {
        tracing::info!(base_url = %config.api.base_url, "using live bills API");
        Arc::new(
            HttpBillsClient::with_timeout(config.api.base_url.trim(), config.api.timeout())?
                .with_observer(Arc::new(TracingObserver))
                .with_retry_policy(config.retry.policy()),
        )
    };

    Ok(Arc::new(CachedSource::new(inner, config.cache.policy())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_mode_serves_fixtures() {
        let mut config = Config::default();
        config.api.mock_mode = true;

        let source = build_source(&config).expect("source");
        let bill = source.get_bill(118, "HR", 2811).await.expect("bill");
        assert_eq!(bill.bill_number, 2811);
    }

    #[tokio::test]
    async fn live_mode_builds_http_client() {
        let mut config = Config::default();
        // Nothing listens here; with retries disabled the failure is immediate.
        config.api.base_url = "http://127.0.0.1:9".into();
        config.retry.max_retries = 0;

        let source = build_source(&config).expect("source");
        let result = source.get_processing_errors().await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}

//! Bundled mock dataset served in mock mode.
//!
//! The dataset lives in `fixtures/mock_data.json` and is compiled into the
//! binary, so mock mode works without any backend or filesystem access.

use async_trait::async_trait;
use serde::Deserialize;

use super::client::{ApiError, BillsApi};
use super::types::{AiSummary, Amendment, Bill, ErrorDetail, TargetRef};

const BUNDLED_DATASET: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/fixtures/mock_data.json"
));

/// Raw contents of a mock dataset file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockDataset {
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub amendments: Vec<Amendment>,
    #[serde(default)]
    pub summaries: Vec<AiSummary>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// `BillsApi` over a fixed in-memory dataset.
///
/// Summaries are kept newest-first by `updated_at`, and bill summaries get
/// their parent bill embedded the way the live listing does.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    dataset: MockDataset,
}

impl FixtureSource {
    /// Load the dataset compiled into the crate.
    ///
    /// # Errors
    /// Returns `ApiError::Malformed` if the bundled JSON does not parse.
    pub fn bundled() -> Result<Self, ApiError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Load a dataset from a JSON document.
    ///
    /// # Errors
    /// Returns `ApiError::Malformed` if `json` is not a valid dataset.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        let dataset: MockDataset = serde_json::from_str(json)
            .map_err(|e| ApiError::Malformed(format!("mock dataset: {e}")))?;
        Ok(Self::from_dataset(dataset))
    }

    #[must_use]
    pub fn from_dataset(mut dataset: MockDataset) -> Self {
        // Stable sort keeps file order among equal timestamps.
        dataset
            .summaries
            .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        for summary in &mut dataset.summaries {
            if summary.bill.is_some() {
                continue;
            }
            if let Ok(TargetRef::Bill(id)) = summary.target() {
                summary.bill = dataset
                    .bills
                    .iter()
                    .find(|bill| id.matches(bill.congress_number, &bill.bill_type, bill.bill_number))
                    .map(|bill| Box::new(bill.clone()));
            }
        }

        Self { dataset }
    }

    #[must_use]
    pub const fn dataset(&self) -> &MockDataset {
        &self.dataset
    }
}

#[async_trait]
impl BillsApi for FixtureSource {
    async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        bill_number: u32,
    ) -> Result<Bill, ApiError> {
        self.dataset
            .bills
            .iter()
            .find(|bill| {
                bill.composite_id()
                    .matches(congress, bill_type, bill_number)
            })
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("{congress}/{bill_type}/{bill_number}")))
    }

    async fn get_amendment(
        &self,
        congress: u32,
        amendment_type: &str,
        amendment_number: u32,
    ) -> Result<Amendment, ApiError> {
        self.dataset
            .amendments
            .iter()
            .find(|amendment| {
                amendment
                    .composite_id()
                    .matches(congress, amendment_type, amendment_number)
            })
            .cloned()
            .ok_or_else(|| {
                ApiError::NotFound(format!("{congress}/{amendment_type}/{amendment_number}"))
            })
    }

    async fn get_recent_summaries(&self, limit: usize) -> Result<Vec<AiSummary>, ApiError> {
        Ok(self.dataset.summaries.iter().take(limit).cloned().collect())
    }

    async fn get_processing_errors(&self) -> Result<Vec<ErrorDetail>, ApiError> {
        Ok(self.dataset.errors.clone())
    }
}

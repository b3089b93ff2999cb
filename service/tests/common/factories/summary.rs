//! `AiSummary` payload factory.

use super::next_id;
use serde_json::{json, Value};

/// Builder for summary JSON as the recent-summaries listing returns it.
pub struct SummaryFactory {
    target_id: String,
    target_type: &'static str,
    sentiment: f64,
    updated_at: String,
}

impl SummaryFactory {
    #[must_use]
    pub fn for_bill(congress: u32, bill_type: &str, number: u32) -> Self {
        Self::new(format!("{congress}/{bill_type}/{number}"), "bill")
    }

    #[must_use]
    pub fn for_amendment(congress: u32, amendment_type: &str, number: u32) -> Self {
        Self::new(format!("{congress}/{amendment_type}/{number}"), "amendment")
    }

    fn new(target_id: String, target_type: &'static str) -> Self {
        Self {
            target_id,
            target_type,
            sentiment: 0.0,
            updated_at: "2023-12-15T10:00:00Z".to_string(),
        }
    }

    #[must_use]
    pub fn with_sentiment(mut self, sentiment: f64) -> Self {
        self.sentiment = sentiment;
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, updated_at: &str) -> Self {
        self.updated_at = updated_at.to_string();
        self
    }

    pub fn json(self) -> Value {
        let id = next_id();
        json!({
            "id": id.to_string(),
            "target_id": self.target_id,
            "target_type": self.target_type,
            "summary": format!("Summary {id}"),
            "analysis": null,
            "key_points": [],
            "sentiment": self.sentiment,
            "created_at": "2023-12-01T00:00:00Z",
            "updated_at": self.updated_at
        })
    }
}

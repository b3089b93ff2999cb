//! `Bill` payload factory.

use super::next_id;
use serde_json::{json, Value};

/// Builder for bill JSON as the API returns it.
///
/// # Examples
///
/// ```rust
/// let bill = BillFactory::new(118, "HR", 2811).json();
///
/// let vetoed = BillFactory::new(118, "S", 3001)
///     .with_action("Vetoed by President.")
///     .json();
/// ```
pub struct BillFactory {
    congress: u32,
    bill_type: String,
    number: u32,
    title: Option<String>,
    action: String,
}

impl BillFactory {
    #[must_use]
    pub fn new(congress: u32, bill_type: &str, number: u32) -> Self {
        Self {
            congress,
            bill_type: bill_type.to_string(),
            number,
            title: None,
            action: "Introduced in House".to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    pub fn json(self) -> Value {
        let id = next_id();
        let title = self
            .title
            .unwrap_or_else(|| format!("Test Bill Act {id}"));

        json!({
            "id": format!("bill-{id}"),
            "congress_number": self.congress,
            "bill_type": self.bill_type,
            "bill_number": self.number,
            "title": title,
            "description": "A bill for testing.",
            "origin_chamber": "House",
            "origin_chamber_code": "H",
            "introduced_date": "2023-04-25",
            "latest_action_date": "2023-04-26",
            "latest_action_text": self.action,
            "update_date": "2023-12-15T10:00:00Z",
            "constitutional_authority_text": null,
            "url": format!(
                "https://www.congress.gov/bill/{}th-congress/{}",
                self.congress, self.number
            ),
            "amendments": [],
            "ai_summary": null
        })
    }
}

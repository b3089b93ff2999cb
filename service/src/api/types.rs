//! Data types for bills API responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_aux::field_attributes::{deserialize_default_from_null, deserialize_number_from_string};
use std::fmt;
use std::str::FromStr;

/// A bill before Congress, with its amendments and AI summary.
///
/// Identified by `(congress_number, bill_type, bill_number)`, e.g.
/// `(118, "HR", 2811)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub congress_number: u32,
    /// Type code (e.g. "HR", "S", "HJRES")
    pub bill_type: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub bill_number: u32,
    pub title: String,
    #[serde(default)]
    pub popular_title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub origin_chamber: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub origin_chamber_code: String,
    #[serde(default)]
    pub introduced_date: Option<NaiveDate>,
    #[serde(default)]
    pub latest_action_date: Option<NaiveDate>,
    /// Free-text legislative status, input to the status classifier.
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub latest_action_text: String,
    #[serde(default)]
    pub update_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub constitutional_authority_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub amendments: Vec<Amendment>,
    /// `None` until the summarization pipeline has processed the bill.
    #[serde(default)]
    pub ai_summary: Option<AiSummary>,
}

impl Bill {
    #[must_use]
    pub fn composite_id(&self) -> CompositeId {
        CompositeId::new(self.congress_number, &self.bill_type, self.bill_number)
    }

    /// Short label such as `HR-2811`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.bill_type, self.bill_number)
    }

    /// Popular title when one exists, the official title otherwise.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.popular_title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.title)
    }
}

/// An amendment to a bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Amendment {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    /// Composite id of the amended bill (e.g. "118/HR/2811")
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub bill_id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub congress_number: u32,
    /// Type code (e.g. "HAMDT", "SAMDT")
    pub amendment_type: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amendment_number: u32,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub purpose: String,
    #[serde(default)]
    pub submitted_date: Option<NaiveDate>,
    #[serde(default)]
    pub latest_action_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub latest_action_text: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub chamber: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub url: String,
    #[serde(default)]
    pub ai_summary: Option<AiSummary>,
}

impl Amendment {
    #[must_use]
    pub fn composite_id(&self) -> CompositeId {
        CompositeId::new(
            self.congress_number,
            &self.amendment_type,
            self.amendment_number,
        )
    }

    /// Parent bill id, when `bill_id` is well formed.
    #[must_use]
    pub fn parent_bill(&self) -> Option<CompositeId> {
        self.bill_id.parse().ok()
    }
}

/// Which kind of record a summary describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Bill,
    Amendment,
}

/// AI-generated analysis of one bill or amendment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiSummary {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    /// Composite id of the target, `{congress}/{type}/{number}`
    pub target_id: String,
    pub target_type: TargetType,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub summary: String,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub perspective: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub key_points: Vec<String>,
    /// Signed score; see [`Sentiment::from_score`].
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub sentiment: f64,
    #[serde(default)]
    pub estimated_cost_impact: Option<String>,
    #[serde(default)]
    pub government_growth_analysis: Option<String>,
    #[serde(default)]
    pub market_impact_analysis: Option<String>,
    #[serde(default)]
    pub liberty_impact_analysis: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Parent bill, embedded by the recent-summaries listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill: Option<Box<Bill>>,
}

impl AiSummary {
    #[must_use]
    pub fn sentiment_label(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment)
    }

    /// Resolve `target_id` / `target_type` into a typed reference.
    ///
    /// # Errors
    /// Returns an error if `target_id` is not `{congress}/{type}/{number}`.
    pub fn target(&self) -> Result<TargetRef, TargetRefError> {
        let id: CompositeId = self.target_id.parse()?;
        Ok(match self.target_type {
            TargetType::Bill => TargetRef::Bill(id),
            TargetType::Amendment => TargetRef::Amendment(id),
        })
    }
}

/// Three-way reading of a sentiment score, split at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// NaN counts as neutral.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        })
    }
}

/// A backend ingestion error, as reported by `/status/errors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Response from the recent-summaries endpoint.
///
/// Any JSON value without a `summaries` property (an object lacking it, a
/// bare array, `null`) reads as an empty listing. Only a `summaries` value
/// of the wrong shape is an error.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SummariesResponse {
    pub summaries: Vec<AiSummary>,
}

impl<'de> Deserialize<'de> for SummariesResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = Value::deserialize(deserializer)?;
        let summaries = match payload.get("summaries") {
            None | Some(Value::Null) => Vec::new(),
            Some(list) => Vec::<AiSummary>::deserialize(list).map_err(de::Error::custom)?,
        };
        Ok(Self { summaries })
    }
}

/// `(congress, type, number)` identifying a bill or amendment.
///
/// Written as `118/HR/2811`, the same form used by summary `target_id`s and
/// the dashboard's `/bills/{congress}/{type}/{number}` paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeId {
    pub congress: u32,
    pub type_code: String,
    pub number: u32,
}

impl CompositeId {
    #[must_use]
    pub fn new(congress: u32, type_code: &str, number: u32) -> Self {
        Self {
            congress,
            type_code: type_code.to_string(),
            number,
        }
    }

    /// Type codes compare case-insensitively ("hr" matches "HR").
    #[must_use]
    pub fn matches(&self, congress: u32, type_code: &str, number: u32) -> bool {
        self.congress == congress
            && self.number == number
            && self.type_code.eq_ignore_ascii_case(type_code)
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.congress, self.type_code, self.number)
    }
}

/// Error returned when a string is not a valid composite id.
#[derive(Debug, thiserror::Error)]
#[error("invalid target id '{input}': {reason}")]
pub struct TargetRefError {
    input: String,
    reason: &'static str,
}

impl FromStr for CompositeId {
    type Err = TargetRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| TargetRefError {
            input: s.to_string(),
            reason,
        };

        let mut parts = s.trim().split('/');
        let (Some(congress), Some(type_code), Some(number), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err("expected {congress}/{type}/{number}"));
        };

        let congress = congress
            .parse()
            .map_err(|_| err("congress must be a number"))?;
        if type_code.is_empty() || !type_code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(err("type must be alphabetic"));
        }
        let number = number.parse().map_err(|_| err("number must be a number"))?;

        Ok(Self::new(congress, type_code, number))
    }
}

/// What a summary points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    Bill(CompositeId),
    Amendment(CompositeId),
}

impl TargetRef {
    #[must_use]
    pub const fn id(&self) -> &CompositeId {
        match self {
            Self::Bill(id) | Self::Amendment(id) => id,
        }
    }
}

//! JSON shapes printed by the CLI: the API records plus derived fields.

use serde::Serialize;

use crate::api::{AiSummary, Amendment, Sentiment, TargetRef};

/// A summary as shown on a dashboard card.
#[derive(Debug, Serialize)]
pub struct SummaryCard<'a> {
    #[serde(flatten)]
    pub summary: &'a AiSummary,
    pub sentiment_label: Sentiment,
    /// Dashboard page the card links to, e.g. `bills/118/HR/2811`.
    pub link: Option<String>,
}

impl<'a> SummaryCard<'a> {
    #[must_use]
    pub fn new(summary: &'a AiSummary) -> Self {
        let link = summary.target().ok().map(|target| {
            let section = match target {
                TargetRef::Bill(_) => "bills",
                TargetRef::Amendment(_) => "amendments",
            };
            format!("{section}/{}", target.id())
        });
        Self {
            summary,
            sentiment_label: summary.sentiment_label(),
            link,
        }
    }
}

/// An amendment with a link back to the bill it amends.
#[derive(Debug, Serialize)]
pub struct AmendmentView<'a> {
    #[serde(flatten)]
    pub amendment: &'a Amendment,
    pub parent_link: Option<String>,
}

impl<'a> AmendmentView<'a> {
    #[must_use]
    pub fn new(amendment: &'a Amendment) -> Self {
        Self {
            amendment,
            parent_link: amendment.parent_bill().map(|id| format!("bills/{id}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BillsApi, FixtureSource};
    use serde_json::json;

    #[tokio::test]
    async fn summary_cards_carry_sentiment_and_link() {
        let source = FixtureSource::bundled().expect("fixture");
        let summaries = source.get_recent_summaries(10).await.expect("summaries");

        let cards: Vec<_> = summaries.iter().map(SummaryCard::new).collect();
        for card in &cards {
            assert_eq!(
                card.sentiment_label,
                Sentiment::from_score(card.summary.sentiment)
            );
            assert!(card.link.is_some(), "fixture target ids are well formed");
        }

        let value = serde_json::to_value(&cards[0]).expect("serialize");
        assert!(value.get("summary").is_some());
        assert!(value.get("sentiment_label").is_some());
    }

    #[test]
    fn card_links_follow_target_type() {
        let summary: AiSummary = serde_json::from_value(json!({
            "target_id": "118/HAMDT/124",
            "target_type": "amendment",
            "sentiment": -0.4,
            "created_at": "2023-12-01T00:00:00Z",
            "updated_at": "2023-12-01T00:00:00Z"
        }))
        .expect("summary");

        let card = SummaryCard::new(&summary);
        assert_eq!(card.link.as_deref(), Some("amendments/118/HAMDT/124"));
        assert_eq!(card.sentiment_label, Sentiment::Negative);

        let value = serde_json::to_value(&card).expect("serialize");
        assert_eq!(value["sentiment_label"], "negative");
        assert_eq!(value["target_id"], "118/HAMDT/124");
    }

    #[test]
    fn bad_target_id_has_no_link() {
        let summary: AiSummary = serde_json::from_value(json!({
            "target_id": "HR-2811",
            "target_type": "bill",
            "created_at": "2023-12-01T00:00:00Z",
            "updated_at": "2023-12-01T00:00:00Z"
        }))
        .expect("summary");

        let card = SummaryCard::new(&summary);
        assert!(card.link.is_none());
        assert_eq!(card.sentiment_label, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn amendment_view_links_parent_bill() {
        let source = FixtureSource::bundled().expect("fixture");
        let amendment = source.get_amendment(118, "HAMDT", 124).await.expect("amendment");

        let view = AmendmentView::new(&amendment);
        assert_eq!(view.parent_link.as_deref(), Some("bills/118/HR/2811"));

        let value = serde_json::to_value(&view).expect("serialize");
        assert_eq!(value["amendment_number"], 124);
        assert_eq!(value["parent_link"], "bills/118/HR/2811");
    }

    #[test]
    fn amendment_without_bill_id_has_no_parent() {
        let amendment: Amendment = serde_json::from_value(json!({
            "congress_number": 118,
            "amendment_type": "SAMDT",
            "amendment_number": 7
        }))
        .expect("amendment");

        assert!(AmendmentView::new(&amendment).parent_link.is_none());
    }
}

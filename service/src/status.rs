//! Status board: House / Senate / President columns for a set of bills.

use bw_status::{Branch, BranchStatus, StatusBoard};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::api::{ApiError, Bill, BillsApi, CompositeId, TargetRef};

/// Classify a bill's latest action for one branch.
#[must_use]
pub fn branch_status(bill: &Bill, branch: Branch) -> BranchStatus {
    bw_status::branch_status(&bill.latest_action_text, branch)
}

/// One row of the tabular status board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub bill_id: String,
    /// e.g. "HR-2811"
    pub label: String,
    pub title: String,
    pub latest_action_date: Option<NaiveDate>,
    pub latest_action_text: String,
    pub status: StatusBoard,
}

impl BoardRow {
    #[must_use]
    pub fn from_bill(bill: &Bill) -> Self {
        Self {
            bill_id: bill.composite_id().to_string(),
            label: bill.label(),
            title: bill.display_title().to_string(),
            latest_action_date: bill.latest_action_date,
            latest_action_text: bill.latest_action_text.clone(),
            status: StatusBoard::from_action_text(&bill.latest_action_text),
        }
    }
}

/// Build board rows for the bills behind the `limit` most recent summaries.
///
/// Amendment summaries are skipped, each bill appears once, and rows keep
/// the order of the summaries. Bills embedded in the listing are used as-is;
/// the rest are fetched individually.
///
/// # Errors
/// Returns the first error from the listing or from a bill lookup.
pub async fn build_board(api: &dyn BillsApi, limit: usize) -> Result<Vec<BoardRow>, ApiError> {
    let summaries = api.get_recent_summaries(limit).await?;

    let mut seen: HashSet<CompositeId> = HashSet::new();
    let mut rows = Vec::new();

    for summary in summaries {
        let id = match summary.target() {
            Ok(TargetRef::Bill(id)) => id,
            Ok(TargetRef::Amendment(_)) => continue,
            Err(err) => {
                tracing::warn!(summary_id = %summary.id, error = %err, "skipping summary with bad target id");
                continue;
            }
        };
        if !seen.insert(id.clone()) {
            continue;
        }

        let bill = match summary.bill {
            Some(bill) => *bill,
            None => api.get_bill(id.congress, &id.type_code, id.number).await?,
        };
        rows.push(BoardRow::from_bill(&bill));
    }

    Ok(rows)
}

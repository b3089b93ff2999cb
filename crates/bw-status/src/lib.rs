//! Legislative status classification for billwatch.
//!
//! Congress reports a bill's progress as a free-text "latest action" string
//! (e.g. `"Passed Senate without amendment"` or `"Presented to President."`).
//! This crate maps that text onto a pass/fail/pending state for each of the
//! three places a bill has to get through: the House, the Senate and the
//! President's desk.
//!
//! The vocabulary is deliberately small. Anything it does not recognize is
//! [`BranchStatus::Unknown`], which is a normal answer rather than an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod board;
pub use board::StatusBoard;

/// A chamber of Congress, or the President.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    House,
    Senate,
    President,
}

impl Branch {
    /// All branches in board column order.
    pub const ALL: [Self; 3] = [Self::House, Self::Senate, Self::President];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Senate => "senate",
            Self::President => "president",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Branch`].
#[derive(Debug, thiserror::Error)]
#[error("unknown branch: {0}")]
pub struct BranchParseError(String);

impl FromStr for Branch {
    type Err = BranchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(Self::House),
            "senate" => Ok(Self::Senate),
            "president" => Ok(Self::President),
            _ => Err(BranchParseError(s.to_string())),
        }
    }
}

/// Where a bill stands with respect to one [`Branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    Passed,
    Failed,
    Pending,
    /// The action text carried no recognizable keyword for this branch.
    Unknown,
}

impl BranchStatus {
    /// Single-glyph form used in the tabular status board.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Failed => "✗",
            Self::Pending => "…",
            Self::Unknown => "–",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a latest-action string for one branch.
///
/// Matching is case-insensitive substring search, first match wins:
///
/// 1. `"to president"` means both chambers passed it: House and Senate are
///    `Passed` without looking further.
/// 2. House: `"passed house"`, `"failed in house"`, `"in house"`.
/// 3. Senate: `"passed senate"`, `"failed in senate"`, `"in senate"`.
/// 4. President: `"signed by president"` is `Passed`, `"vetoed"` is
///    `Failed`. Otherwise `"to president"` leaves the President `Pending`.
///
/// Rule 1 only settles the chambers. Text such as
/// `"Presented to President. Signed by President."` is still `Passed` for
/// the President.
///
/// Never panics. Text with no matching keyword yields
/// [`BranchStatus::Unknown`].
#[must_use]
pub fn branch_status(action_text: &str, branch: Branch) -> BranchStatus {
    let text = action_text.to_lowercase();
    let to_president = text.contains("to president");

    match branch {
        Branch::House | Branch::Senate if to_president => BranchStatus::Passed,
        Branch::House => chamber_status(&text, "passed house", "failed in house", "in house"),
        Branch::Senate => chamber_status(&text, "passed senate", "failed in senate", "in senate"),
        Branch::President => {
            if text.contains("signed by president") {
                BranchStatus::Passed
            } else if text.contains("vetoed") {
                BranchStatus::Failed
            } else if to_president {
                BranchStatus::Pending
            } else {
                BranchStatus::Unknown
            }
        }
    }
}

fn chamber_status(text: &str, passed: &str, failed: &str, pending: &str) -> BranchStatus {
    if text.contains(passed) {
        BranchStatus::Passed
    } else if text.contains(failed) {
        BranchStatus::Failed
    } else if text.contains(pending) {
        BranchStatus::Pending
    } else {
        BranchStatus::Unknown
    }
}

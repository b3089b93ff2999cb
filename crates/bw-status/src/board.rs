//! One row of the House / Senate / President status board.

use serde::{Deserialize, Serialize};

use crate::{branch_status, Branch, BranchStatus};

/// Status of a bill in all three branches, derived from one action string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBoard {
    pub house: BranchStatus,
    pub senate: BranchStatus,
    pub president: BranchStatus,
}

impl StatusBoard {
    /// Classify `action_text` for every branch.
    #[must_use]
    pub fn from_action_text(action_text: &str) -> Self {
        Self {
            house: branch_status(action_text, Branch::House),
            senate: branch_status(action_text, Branch::Senate),
            president: branch_status(action_text, Branch::President),
        }
    }

    /// Status for a single branch.
    #[must_use]
    pub const fn get(&self, branch: Branch) -> BranchStatus {
        match branch {
            Branch::House => self.house,
            Branch::Senate => self.senate,
            Branch::President => self.president,
        }
    }

    /// Board glyphs in column order, e.g. `["✓", "✓", "…"]`.
    #[must_use]
    pub const fn symbols(&self) -> [&'static str; 3] {
        [
            self.house.symbol(),
            self.senate.symbol(),
            self.president.symbol(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_matches_per_branch_classification() {
        let text = "Passed Senate without amendment; Introduced in House";
        let board = StatusBoard::from_action_text(text);
        for branch in Branch::ALL {
            assert_eq!(board.get(branch), branch_status(text, branch));
        }
    }

    #[test]
    fn enrolled_bill_board() {
        let board = StatusBoard::from_action_text("Presented to President.");
        assert_eq!(board.symbols(), ["✓", "✓", "…"]);
    }

    #[test]
    fn unrecognized_text_renders_dashes() {
        let board = StatusBoard::from_action_text("Held at the desk.");
        assert_eq!(board.symbols(), ["–", "–", "–"]);
    }
}

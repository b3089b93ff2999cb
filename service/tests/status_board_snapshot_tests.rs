//! Status board snapshot over the bundled mock dataset.
//!
//! Run `cargo insta review` to inspect and approve intentional changes.

use billwatch::api::{BillsApi, FixtureSource};
use billwatch::status::build_board;
use billwatch::{Branch, BranchStatus};

#[tokio::test]
async fn fixture_status_board() {
    let source = FixtureSource::bundled().expect("bundled dataset");
    let rows = build_board(&source, 10).await.expect("board");
    insta::assert_json_snapshot!("fixture_status_board", rows);
}

#[tokio::test]
async fn fixture_bill_matches_requested_id() {
    let source = FixtureSource::bundled().expect("bundled dataset");

    let bill = source.get_bill(118, "HR", 2811).await.expect("bill");

    assert_eq!(
        (bill.congress_number, bill.bill_type.as_str(), bill.bill_number),
        (118, "HR", 2811)
    );
    // "Passed House; to Senate" pins the ambiguous chamber case.
    assert_eq!(
        billwatch::status::branch_status(&bill, Branch::House),
        BranchStatus::Passed
    );
    assert_eq!(
        billwatch::status::branch_status(&bill, Branch::Senate),
        BranchStatus::Unknown
    );
}

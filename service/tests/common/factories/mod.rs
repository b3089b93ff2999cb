//! Test data factories for API payloads.
//!
//! # Usage
//!
//! ```rust
//! use common::factories::{BillFactory, SummaryFactory};
//!
//! let bill = BillFactory::new(118, "HR", 2811).with_action("Passed House").json();
//! let summary = SummaryFactory::for_bill(118, "HR", 2811).json();
//! ```

mod bill;
mod summary;

pub use bill::BillFactory;
pub use summary::SummaryFactory;

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique test data.
/// Each call to `next_id()` returns a unique value across all tests.
static FACTORY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Returns a unique ID for generating test data.
/// Thread-safe and guaranteed unique within a test run.
pub fn next_id() -> u64 {
    FACTORY_COUNTER.fetch_add(1, Ordering::SeqCst)
}

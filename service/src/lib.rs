#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod api;
pub mod cache;
pub mod config;
pub mod source;
pub mod status;
pub mod views;

pub use bw_status::{Branch, BranchStatus, StatusBoard};

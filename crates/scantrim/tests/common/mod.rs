//! Shared test utilities for scantrim integration tests.
//!
//! - `TestHarness` owns temporary source and archive directories and runs
//!   batches against them
//! - builders produce scanned-looking PDFs and configs without fixtures

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::TestHarness;

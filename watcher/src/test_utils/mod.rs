//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The mocks are hand-written in-memory ports rather than generated ones:
//! they record what they were asked and can be told to fail a set number of
//! times, which is all the pipeline tests need.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

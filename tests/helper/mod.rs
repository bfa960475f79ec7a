//! Shared test utilities

pub mod source;

pub use source::{ApiServer, GO1, GO1_1, GO1_2};

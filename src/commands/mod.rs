//! CLI command implementations.

pub mod search;

pub use search::{SearchCommand, SearchReport, NO_RESULTS_MESSAGE};

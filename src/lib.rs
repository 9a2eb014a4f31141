//! book-scout - search book catalogs and export a price comparison report
//!
//! Queries five catalog sites in turn, normalizes their listings, and writes
//! an Excel sheet, a per-site bar chart and a PDF summary.

pub mod aggregator;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod export;
pub mod filters;
pub mod format;

pub use aggregator::{Aggregation, Aggregator, SourceOutcome, SourceTally};
pub use catalog::{BookRecord, Source};
pub use config::Config;

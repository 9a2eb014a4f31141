//! Catalog sites: HTTP client, selectors, parsing, and extraction.

pub mod client;
pub mod extractor;
pub mod models;
pub mod parser;
pub mod selectors;
pub mod sources;

pub use client::{CatalogClient, CatalogSearch};
pub use extractor::Extractor;
pub use models::{BookRecord, FREE, NOT_AVAILABLE, UNKNOWN};
pub use parser::Parser;
pub use sources::Source;

//! Per-source extraction: fetch result pages, parse listings, filter titles.

use crate::catalog::client::CatalogSearch;
use crate::catalog::models::BookRecord;
use crate::catalog::parser::Parser;
use crate::catalog::sources::{normalize_query, Source};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use anyhow::Result;
use tracing::debug;

/// Runs one source's search and returns its records in page order.
pub struct Extractor {
    parser: Parser,
    catalog_pages: u32,
    match_titles: bool,
    exclude_keywords: Vec<String>,
}

impl Extractor {
    /// Creates an extractor from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            parser: Parser::new(config.currency_symbol.clone(), config.max_per_source),
            catalog_pages: config.catalog_pages,
            match_titles: config.match_titles,
            exclude_keywords: config.exclude_keywords.clone(),
        }
    }

    /// Fetches and parses every page of `source` for `query`.
    ///
    /// Any fetch or parse failure aborts this source and is returned as is.
    pub async fn extract(
        &self,
        client: &impl CatalogSearch,
        source: Source,
        query: &str,
    ) -> Result<Vec<BookRecord>> {
        let query = normalize_query(query);

        let filters = FilterChainBuilder::new()
            .title_query(&query, self.match_titles)
            .exclude_keywords(self.exclude_keywords.clone())
            .build();

        if !filters.is_empty() {
            debug!("Active filters for {}: {}", source, filters.descriptions().join(", "));
        }

        let mut records = Vec::new();

        for page in 1..=source.pages(self.catalog_pages) {
            let html = client.search(source, &query, page).await?;
            let listings = self.parser.parse_listings(source, &html)?;
            let found = listings.len();

            let kept = filters.apply(listings);
            debug!("{} page {}: {} listings, {} kept", source, page, found, kept.len());

            records.extend(kept);
        }

        Ok(records)
    }
}

//! Composable title filters applied to every source's listings.

pub mod keyword;

use crate::catalog::BookRecord;

pub use keyword::KeywordFilter;

/// Trait for filtering book records.
pub trait Filter: Send + Sync {
    /// Returns true if the record passes the filter.
    fn matches(&self, record: &BookRecord) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &BookRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Filters records, keeping their order.
    pub fn apply(&self, records: Vec<BookRecord>) -> Vec<BookRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Requires the whole query phrase in the title when `enabled`.
    pub fn title_query(mut self, query: &str, enabled: bool) -> Self {
        let query = query.trim();
        if enabled && !query.is_empty() {
            self.chain.add(KeywordFilter::required(vec![query.to_string()]));
        }
        self
    }

    /// Adds excluded keywords filter.
    pub fn exclude_keywords(mut self, keywords: Vec<String>) -> Self {
        let keywords: Vec<String> =
            keywords.into_iter().filter(|k| !k.trim().is_empty()).collect();
        if !keywords.is_empty() {
            self.chain.add(KeywordFilter::excluded(keywords));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Source, FREE, UNKNOWN};

    fn make_record(title: &str) -> BookRecord {
        BookRecord::new(title, UNKNOWN, FREE, Source::OpenLibrary)
    }

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&make_record("Anything")));
    }

    #[test]
    fn test_filter_chain_apply_keeps_order() {
        let chain = FilterChainBuilder::new().title_query("python", true).build();

        let records = vec![
            make_record("Python Tricks"),
            make_record("Rust in Action"),
            make_record("Learning Python"),
            make_record("python"),
        ];

        let titles: Vec<String> = chain.apply(records).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Python Tricks", "Learning Python", "python"]);
    }

    #[test]
    fn test_title_query_is_a_phrase() {
        let chain = FilterChainBuilder::new().title_query("  deep learning ", true).build();

        assert!(chain.matches(&make_record("Deep Learning with Python")));
        assert!(!chain.matches(&make_record("Learning Deep Structures")));
    }

    #[test]
    fn test_title_query_disabled() {
        let chain = FilterChainBuilder::new().title_query("python", false).build();
        assert!(chain.is_empty());
        assert!(chain.matches(&make_record("Rust in Action")));
    }

    #[test]
    fn test_blank_inputs_add_no_filters() {
        let chain = FilterChainBuilder::default()
            .title_query("   ", true)
            .exclude_keywords(vec![String::new(), " ".to_string()])
            .build();

        assert!(chain.is_empty());
    }

    #[test]
    fn test_query_and_exclusions_combined() {
        let chain = FilterChainBuilder::new()
            .title_query("python", true)
            .exclude_keywords(vec!["Workbook".to_string()])
            .build();

        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&make_record("Python Crash Course")));
        assert!(!chain.matches(&make_record("Python Workbook")));
        assert!(!chain.matches(&make_record("Crash Course")));

        let descriptions = chain.descriptions();
        assert!(descriptions[0].contains("Must contain: python"));
        assert!(descriptions[1].contains("Must not contain: workbook"));
    }
}

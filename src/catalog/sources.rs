//! Catalog sites, their URL templates and currency conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported catalog sites, in the fixed order they are queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    BooksToScrape,
    OpenLibrary,
    Gutenberg,
    BetterWorldBooks,
    AbeBooks,
}

impl Source {
    /// Returns the display name, also used as the `Website` column value.
    pub fn name(&self) -> &'static str {
        match self {
            Source::BooksToScrape => "BooksToScrape",
            Source::OpenLibrary => "OpenLibrary",
            Source::Gutenberg => "Gutenberg",
            Source::BetterWorldBooks => "BetterWorldBooks",
            Source::AbeBooks => "AbeBooks",
        }
    }

    /// Returns the production base URL for this site.
    pub fn base_url(&self) -> &'static str {
        match self {
            Source::BooksToScrape => "http://books.toscrape.com",
            Source::OpenLibrary => "https://openlibrary.org",
            Source::Gutenberg => "https://www.gutenberg.org",
            Source::BetterWorldBooks => "https://www.betterworldbooks.com",
            Source::AbeBooks => "https://www.abebooks.com",
        }
    }

    /// Builds the path and query string for one results page.
    ///
    /// `encoded_query` must already be URL-encoded. BooksToScrape has no
    /// search endpoint, so its path only depends on the page number.
    pub fn search_path(&self, encoded_query: &str, page: u32) -> String {
        match self {
            Source::BooksToScrape => format!("/catalogue/page-{}.html", page),
            Source::OpenLibrary => format!("/search?q={}", encoded_query),
            Source::Gutenberg => format!("/ebooks/search/?query={}", encoded_query),
            Source::BetterWorldBooks => format!("/search/results?q={}", encoded_query),
            Source::AbeBooks => format!(
                "/servlet/SearchResults?sts=t&cm_sp=SearchF-_-topnav-_-Results&an=&tn={}",
                encoded_query
            ),
        }
    }

    /// Number of result pages fetched per search.
    pub fn pages(&self, catalog_pages: u32) -> u32 {
        match self {
            Source::BooksToScrape => catalog_pages.max(1),
            _ => 1,
        }
    }

    /// Maximum listings taken from a page, `None` for the browse catalog.
    pub fn listing_cap(&self, max_per_source: usize) -> Option<usize> {
        match self {
            Source::BooksToScrape => None,
            _ => Some(max_per_source),
        }
    }

    /// Whether the site rejects requests that don't look like a browser.
    pub fn requires_browser(&self) -> bool {
        !matches!(self, Source::BooksToScrape)
    }

    /// Currency symbol printed by the site, if it lists prices.
    pub fn currency_symbol(&self) -> Option<&'static str> {
        match self {
            Source::BooksToScrape => Some("£"),
            Source::BetterWorldBooks | Source::AbeBooks => Some("$"),
            Source::OpenLibrary | Source::Gutenberg => None,
        }
    }

    /// Returns all sources in query order.
    pub fn all() -> &'static [Source] {
        &[
            Source::BooksToScrape,
            Source::OpenLibrary,
            Source::Gutenberg,
            Source::BetterWorldBooks,
            Source::AbeBooks,
        ]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collapses whitespace in a query; `"  rust   in action "` becomes `"rust in action"`.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Encodes a query for embedding in a URL, joining words with `+`.
pub fn encode_query(query: &str) -> String {
    query.split_whitespace().map(|word| urlencoding::encode(word)).collect::<Vec<_>>().join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_order() {
        let names: Vec<&str> = Source::all().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["BooksToScrape", "OpenLibrary", "Gutenberg", "BetterWorldBooks", "AbeBooks"]
        );
    }

    #[test]
    fn test_search_paths() {
        assert_eq!(Source::BooksToScrape.search_path("rust", 2), "/catalogue/page-2.html");
        assert_eq!(Source::OpenLibrary.search_path("rust+book", 1), "/search?q=rust+book");
        assert_eq!(Source::Gutenberg.search_path("dune", 1), "/ebooks/search/?query=dune");
        assert_eq!(Source::BetterWorldBooks.search_path("dune", 1), "/search/results?q=dune");
        assert!(Source::AbeBooks.search_path("dune", 1).ends_with("&an=&tn=dune"));
    }

    #[test]
    fn test_pages_and_caps() {
        assert_eq!(Source::BooksToScrape.pages(3), 3);
        assert_eq!(Source::BooksToScrape.pages(0), 1);
        assert_eq!(Source::Gutenberg.pages(3), 1);
        assert_eq!(Source::BooksToScrape.listing_cap(10), None);
        assert_eq!(Source::AbeBooks.listing_cap(10), Some(10));
    }

    #[test]
    fn test_browser_requirement() {
        assert!(!Source::BooksToScrape.requires_browser());
        for source in &Source::all()[1..] {
            assert!(source.requires_browser(), "{} should require a browser", source);
        }
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(Source::BooksToScrape.currency_symbol(), Some("£"));
        assert_eq!(Source::BetterWorldBooks.currency_symbol(), Some("$"));
        assert_eq!(Source::OpenLibrary.currency_symbol(), None);
    }

    #[test]
    fn test_normalize_and_encode_query() {
        assert_eq!(normalize_query("  rust   in\taction "), "rust in action");
        assert_eq!(encode_query("rust in action"), "rust+in+action");
        assert_eq!(encode_query("c++ & you"), "c%2B%2B+%26+you");
        assert_eq!(encode_query("   "), "");
    }
}

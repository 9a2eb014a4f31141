//! HTML parser turning catalog result pages into book records.

use crate::catalog::models::{rewrite_currency, BookRecord, FREE, NOT_AVAILABLE, UNKNOWN};
use crate::catalog::selectors::{
    abebooks, books_to_scrape, better_world_books, errors, gutenberg, open_library,
};
use crate::catalog::sources::Source;
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// Parser for catalog result pages.
pub struct Parser {
    currency_symbol: String,
    max_per_source: usize,
}

impl Parser {
    /// Creates a parser that rewrites prices to `currency_symbol` and keeps
    /// at most `max_per_source` listings per page on capped sites.
    pub fn new(currency_symbol: impl Into<String>, max_per_source: usize) -> Self {
        Self { currency_symbol: currency_symbol.into(), max_per_source }
    }

    /// Parses one results page of `source` into records, in page order.
    pub fn parse_listings(&self, source: Source, html: &str) -> Result<Vec<BookRecord>> {
        let document = Html::parse_document(html);

        self.check_for_errors(source, &document)?;

        let cap = source.listing_cap(self.max_per_source).unwrap_or(usize::MAX);
        let mut records = Vec::new();

        for element in document.select(listing_selector(source)).take(cap) {
            match self.parse_listing(source, element) {
                Some(record) => {
                    trace!("Parsed {} listing: {}", source, record.title);
                    records.push(record);
                }
                None => {
                    // Priced sites drop cards without a title or price
                    trace!("Skipping incomplete {} listing", source);
                }
            }
        }

        debug!("Parsed {} listings from {}", records.len(), source);

        Ok(records)
    }

    /// Fails when the site served a bot challenge instead of results.
    fn check_for_errors(&self, source: Source, document: &Html) -> Result<()> {
        if document.select(&errors::CHALLENGE).next().is_some() {
            anyhow::bail!(
                "{} served a bot challenge instead of results. \
                Try again later or configure a proxy.",
                source
            );
        }

        Ok(())
    }

    fn parse_listing(&self, source: Source, element: ElementRef) -> Option<BookRecord> {
        match source {
            Source::BooksToScrape => Some(self.parse_catalog_card(element)),
            Source::OpenLibrary => Some(self.parse_free_listing(
                source,
                element,
                &open_library::TITLE,
                &open_library::AUTHOR,
            )),
            Source::Gutenberg => Some(self.parse_free_listing(
                source,
                element,
                &gutenberg::TITLE,
                &gutenberg::AUTHOR,
            )),
            Source::BetterWorldBooks => self.parse_priced_listing(
                source,
                element,
                &better_world_books::TITLE,
                &better_world_books::AUTHOR,
                &better_world_books::PRICE,
            ),
            Source::AbeBooks => self.parse_priced_listing(
                source,
                element,
                &abebooks::TITLE,
                &abebooks::AUTHOR,
                &abebooks::PRICE,
            ),
        }
    }

    /// BooksToScrape cards carry no author; the full title is an attribute.
    fn parse_catalog_card(&self, element: ElementRef) -> BookRecord {
        let title = element
            .select(&books_to_scrape::TITLE_LINK)
            .next()
            .and_then(|e| e.value().attr(books_to_scrape::TITLE_ATTR))
            .map(collapse_whitespace)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let price = select_text(element, &books_to_scrape::PRICE)
            .map(|p| self.rewrite_price(Source::BooksToScrape, &p))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        BookRecord::new(title, NOT_AVAILABLE, price, Source::BooksToScrape)
    }

    /// Free ebook catalogs: title and author fall back to "Unknown".
    fn parse_free_listing(
        &self,
        source: Source,
        element: ElementRef,
        title: &Selector,
        author: &Selector,
    ) -> BookRecord {
        let title = select_first_text(element, title).unwrap_or_else(|| UNKNOWN.to_string());
        let author = select_text(element, author).unwrap_or_else(|| UNKNOWN.to_string());

        BookRecord::new(title, author, FREE, source)
    }

    fn parse_priced_listing(
        &self,
        source: Source,
        element: ElementRef,
        title: &Selector,
        author: &Selector,
        price: &Selector,
    ) -> Option<BookRecord> {
        let title = select_text(element, title)?;
        let price = select_text(element, price)?;
        let author = select_text(element, author).unwrap_or_else(|| UNKNOWN.to_string());

        Some(BookRecord::new(title, author, self.rewrite_price(source, &price), source))
    }

    fn rewrite_price(&self, source: Source, text: &str) -> String {
        match source.currency_symbol() {
            Some(symbol) => rewrite_currency(text, symbol, &self.currency_symbol),
            None => text.to_string(),
        }
    }
}

fn listing_selector(source: Source) -> &'static Selector {
    match source {
        Source::BooksToScrape => &books_to_scrape::LISTING,
        Source::OpenLibrary => &open_library::LISTING,
        Source::Gutenberg => &gutenberg::LISTING,
        Source::BetterWorldBooks => &better_world_books::LISTING,
        Source::AbeBooks => &abebooks::LISTING,
    }
}

/// Text of the first match with whitespace collapsed, `None` if missing or blank.
fn select_text(element: ElementRef, selector: &Selector) -> Option<String> {
    let text = collapse_whitespace(&element.select(selector).next()?.text().collect::<String>());

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of the first match that isn't blank, skipping e.g. image-only links.
fn select_first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .map(|e| collapse_whitespace(&e.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! Data model for normalized book listings.

use crate::catalog::sources::Source;
use serde::{Deserialize, Serialize};

/// Placeholder for a title or author the listing doesn't show.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a field the site never provides.
pub const NOT_AVAILABLE: &str = "N/A";

/// Price shown for free ebook catalogs.
pub const FREE: &str = "Free";

/// A single listing normalized across sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    /// Price with the currency symbol rewritten, or a sentinel
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Website")]
    pub source: Source,
}

impl BookRecord {
    /// Creates a new record.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        price: impl Into<String>,
        source: Source,
    ) -> Self {
        Self { title: title.into(), author: author.into(), price: price.into(), source }
    }

    /// Renders the record as a single report line.
    pub fn report_line(&self) -> String {
        format!(
            "- {} | Author: {} | Price: {} | {}",
            self.title, self.author, self.price, self.source
        )
    }
}

/// Replaces every occurrence of `from` with `to`, leaving the amount untouched.
///
/// This is a display rewrite, not a conversion: `£12.50` becomes `₹12.50`.
pub fn rewrite_currency(price: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return price.to_string();
    }
    price.replace(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_currency() {
        assert_eq!(rewrite_currency("£12.50", "£", "₹"), "₹12.50");
        assert_eq!(rewrite_currency("$8.00", "$", "₹"), "₹8.00");
        assert_eq!(rewrite_currency("$8.00 - $12.00", "$", "₹"), "₹8.00 - ₹12.00");
        assert_eq!(rewrite_currency("12.50", "£", "₹"), "12.50");
        assert_eq!(rewrite_currency("£3", "", "₹"), "£3");
    }

    #[test]
    fn test_report_line() {
        let record = BookRecord::new("Dune", "Frank Herbert", "₹9.99", Source::AbeBooks);
        assert_eq!(record.report_line(), "- Dune | Author: Frank Herbert | Price: ₹9.99 | AbeBooks");
    }

    #[test]
    fn test_duplicates_are_distinct_values() {
        let a = BookRecord::new("Emma", UNKNOWN, FREE, Source::OpenLibrary);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(vec![a, b].len(), 2);
    }

    #[test]
    fn test_record_serde_field_names() {
        let record = BookRecord::new("Emma", "Jane Austen", FREE, Source::Gutenberg);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Title\":\"Emma\""));
        assert!(json.contains("\"Website\":\"Gutenberg\""));

        let parsed: BookRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}

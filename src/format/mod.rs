//! Terminal output for combined records (table, JSON, markdown).

use crate::catalog::{BookRecord, Source};
use crate::config::OutputFormat;

/// Formats records for stdout.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the records in the configured style.
    pub fn format_records(&self, records: &[BookRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No books found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
        }
    }

    fn json_records(&self, records: &[BookRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_records(&self, records: &[BookRecord]) -> String {
        let site_width = 16;
        let price_width = 12;
        let author_width = 24;
        let title_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<site_width$}  {:<price_width$}  {:<author_width$}  {}",
            "Website", "Price", "Author", "Title"
        ));
        lines.push(format!(
            "{:-<site_width$}  {:-<price_width$}  {:-<author_width$}  {:-<title_width$}",
            "", "", "", ""
        ));

        for record in records {
            lines.push(format!(
                "{:<site_width$}  {:>price_width$}  {:<author_width$}  {}",
                record.source.name(),
                truncate(&record.price, price_width),
                truncate(&record.author, author_width),
                truncate(&record.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} books ({})", records.len(), source_totals(records)));

        lines.join("\n")
    }

    fn markdown_records(&self, records: &[BookRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Title | Author | Price | Website |".to_string());
        lines.push("|-------|--------|-------|---------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                escape_pipes(&truncate(&record.title, 60)),
                escape_pipes(&record.author),
                escape_pipes(&record.price),
                record.source
            ));
        }

        lines.join("\n")
    }
}

/// Per-source counts in order of first appearance, e.g. `Gutenberg: 2`.
fn source_totals(records: &[BookRecord]) -> String {
    let mut totals: Vec<(Source, usize)> = Vec::new();

    for record in records {
        match totals.iter_mut().find(|(source, _)| *source == record.source) {
            Some(entry) => entry.1 += 1,
            None => totals.push((record.source, 1)),
        }
    }

    totals
        .iter()
        .map(|(source, count)| format!("{}: {}", source, count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shortens `s` to `max` characters, ending in "..." when cut.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn escape_pipes(s: &str) -> String {
    s.replace('|', "\\|")
}

//! Search command: aggregate every source, then write the report artifacts.

use crate::aggregator::{Aggregation, Aggregator};
use crate::catalog::{CatalogClient, CatalogSearch};
use crate::config::Config;
use crate::export::{viewer, Artifact, ExportPipeline};
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::fmt;
use tracing::{debug, info};

/// Printed when no source returned a matching record.
pub const NO_RESULTS_MESSAGE: &str = "No books found for your query. Try another title.";

/// Outcome of one search, ready for the terminal.
#[derive(Debug)]
pub struct SearchReport {
    pub aggregation: Aggregation,
    /// Files written, in pipeline order; empty when nothing was found
    pub artifacts: Vec<Artifact>,
    /// Records rendered with `--print`, if requested
    pub listing: Option<String>,
}

impl SearchReport {
    pub fn found_nothing(&self) -> bool {
        self.aggregation.is_empty()
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .aggregation
            .failures()
            .map(|(source, message)| format!("Error scraping {}: {}", source, message))
            .collect();

        if self.found_nothing() {
            lines.push(NO_RESULTS_MESSAGE.to_string());
        } else {
            if let Some(listing) = &self.listing {
                lines.push(listing.clone());
            }
            lines.extend(self.artifacts.iter().map(|a| a.to_string()));
        }

        write!(f, "{}", lines.join("\n"))
    }
}

/// Executes a search across every source.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search against the live sites.
    pub async fn execute(&self, query: &str) -> Result<SearchReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, query).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl CatalogSearch,
        query: &str,
    ) -> Result<SearchReport> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("Search query must not be empty");
        }

        info!("Searching for: {}", query);

        let aggregation = Aggregator::new(&self.config).aggregate(client, query).await;
        info!(
            "Found {} books across {} sources",
            aggregation.records.len(),
            aggregation.tally.len()
        );

        if aggregation.is_empty() {
            return Ok(SearchReport { aggregation, artifacts: Vec::new(), listing: None });
        }

        let artifacts = ExportPipeline::from_config(&self.config)
            .run(&aggregation)
            .context("Failed to export results")?;

        if self.config.open_report {
            let report = self.config.report_path();
            if !viewer::open_report(&report) {
                debug!("Report left unopened: {}", report.display());
            }
        }

        let listing =
            self.config.print.map(|format| Formatter::new(format).format_records(&aggregation.records));

        Ok(SearchReport { aggregation, artifacts, listing })
    }
}

//! Runs every source in order and combines their records.
//!
//! Each source is isolated: a failed fetch or parse is captured as a
//! [`SourceOutcome::Failed`] with a zero tally and the run moves on.

use crate::catalog::{BookRecord, CatalogSearch, Extractor, Source};
use crate::config::Config;
use serde::Serialize;
use tracing::{info, warn};

/// Result of querying one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SourceOutcome {
    /// Number of records contributed.
    Found(usize),
    /// Error message of the failed fetch or parse.
    Failed(String),
}

impl SourceOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed(_))
    }
}

/// Records contributed per source, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceTally {
    entries: Vec<(Source, usize)>,
}

impl SourceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `source`, appending it if not yet present.
    pub fn record(&mut self, source: Source, count: usize) {
        match self.entries.iter_mut().find(|(s, _)| *s == source) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((source, count)),
        }
    }

    /// Count for `source`, zero if it was never recorded.
    pub fn get(&self, source: Source) -> usize {
        self.entries.iter().find(|(s, _)| *s == source).map(|(_, c)| *c).unwrap_or(0)
    }

    /// Sum over all sources.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Source, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Combined output of one search across all sources.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub query: String,
    /// Records concatenated in source order
    pub records: Vec<BookRecord>,
    pub tally: SourceTally,
    pub outcomes: Vec<(Source, SourceOutcome)>,
}

impl Aggregation {
    /// Returns true if no source produced a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sources that failed, with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (Source, &str)> + '_ {
        self.outcomes.iter().filter_map(|(source, outcome)| match outcome {
            SourceOutcome::Failed(message) => Some((*source, message.as_str())),
            SourceOutcome::Found(_) => None,
        })
    }
}

/// Queries a fixed sequence of sources one after another.
pub struct Aggregator {
    extractor: Extractor,
    sources: Vec<Source>,
}

impl Aggregator {
    /// Creates an aggregator over all sources.
    pub fn new(config: &Config) -> Self {
        Self::with_sources(config, Source::all().to_vec())
    }

    /// Creates an aggregator over the given sources, queried in that order.
    pub fn with_sources(config: &Config, sources: Vec<Source>) -> Self {
        Self { extractor: Extractor::new(config), sources }
    }

    /// Searches every source for `query`; never fails as a whole.
    pub async fn aggregate(&self, client: &impl CatalogSearch, query: &str) -> Aggregation {
        let mut records = Vec::new();
        let mut tally = SourceTally::new();
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for &source in &self.sources {
            let outcome = match self.extractor.extract(client, source, query).await {
                Ok(found) => {
                    info!("{} returned {} books", source, found.len());
                    let count = found.len();
                    records.extend(found);
                    SourceOutcome::Found(count)
                }
                Err(e) => {
                    warn!("Error scraping {}: {:#}", source, e);
                    SourceOutcome::Failed(format!("{:#}", e))
                }
            };

            let count = match &outcome {
                SourceOutcome::Found(count) => *count,
                SourceOutcome::Failed(_) => 0,
            };
            tally.record(source, count);
            outcomes.push((source, outcome));
        }

        Aggregation { query: query.to_string(), records, tally, outcomes }
    }
}

//! Report artifacts written after a successful search.
//!
//! Exporters run in a fixed order: spreadsheet, chart, then the PDF report,
//! which embeds the chart file written just before it.

pub mod chart;
pub mod report;
pub mod spreadsheet;
pub mod viewer;

use crate::aggregator::Aggregation;
use crate::config::Config;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

pub use chart::ChartExporter;
pub use report::ReportExporter;
pub use spreadsheet::SpreadsheetExporter;

/// Errors raised while writing an artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write spreadsheet: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to render chart: {0}")]
    Chart(String),

    #[error("Failed to write report: {0}")]
    Report(String),
}

/// Trait for a sink that turns search results into one file.
pub trait Exporter {
    /// Artifact kind shown in status lines.
    fn kind(&self) -> &'static str;

    /// Writes the artifact and returns its path.
    fn export(&self, aggregation: &Aggregation) -> Result<PathBuf, ExportError>;
}

/// A file written by an exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: &'static str,
    pub path: PathBuf,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} saved to: {}", self.kind, self.path.display())
    }
}

/// Exporters run one after another; the first failure stops the pipeline.
pub struct ExportPipeline {
    output_dir: PathBuf,
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExportPipeline {
    /// Creates an empty pipeline writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), exporters: Vec::new() }
    }

    /// Spreadsheet, chart and report, in that order.
    pub fn from_config(config: &Config) -> Self {
        let mut pipeline = Self::new(&config.output_dir);
        pipeline
            .add(SpreadsheetExporter::new(config.spreadsheet_path()))
            .add(ChartExporter::new(config.chart_path()))
            .add(ReportExporter::new(config.report_path(), config.chart_path()));
        pipeline
    }

    /// Appends an exporter.
    pub fn add(&mut self, exporter: impl Exporter + 'static) -> &mut Self {
        self.exporters.push(Box::new(exporter));
        self
    }

    pub fn len(&self) -> usize {
        self.exporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }

    /// Runs every exporter; artifacts written before a failure stay on disk.
    pub fn run(&self, aggregation: &Aggregation) -> Result<Vec<Artifact>, ExportError> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|source| ExportError::Io { path: self.output_dir.clone(), source })?;

        let mut artifacts = Vec::with_capacity(self.exporters.len());

        for exporter in &self.exporters {
            let path = exporter.export(aggregation)?;
            info!("{} written to {}", exporter.kind(), path.display());
            artifacts.push(Artifact { kind: exporter.kind(), path });
        }

        Ok(artifacts)
    }
}

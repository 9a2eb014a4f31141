//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay before each request in milliseconds
    #[serde(default)]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Listings taken from each search site
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,

    /// Browse pages fetched from BooksToScrape
    #[serde(default = "default_catalog_pages")]
    pub catalog_pages: u32,

    /// Symbol that replaces the sites' own currency symbols
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Keep only listings whose title contains the query
    #[serde(default = "default_true")]
    pub match_titles: bool,

    /// Drop listings whose title contains any of these words
    #[serde(default)]
    pub exclude_keywords: Vec<String>,

    /// Directory the artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_spreadsheet_file")]
    pub spreadsheet_file: String,

    #[serde(default = "default_chart_file")]
    pub chart_file: String,

    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Open the PDF report in the default viewer when done
    #[serde(default = "default_true")]
    pub open_report: bool,

    /// Also print the combined records to stdout in this format
    #[serde(default)]
    pub print: Option<OutputFormat>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_per_source() -> usize {
    10
}

fn default_catalog_pages() -> u32 {
    3
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_spreadsheet_file() -> String {
    "book_results.xlsx".to_string()
}

fn default_chart_file() -> String {
    "graph.png".to_string()
}

fn default_report_file() -> String {
    "report.pdf".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            delay_ms: 0,
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            max_per_source: default_max_per_source(),
            catalog_pages: default_catalog_pages(),
            currency_symbol: default_currency_symbol(),
            match_titles: true,
            exclude_keywords: Vec::new(),
            output_dir: default_output_dir(),
            spreadsheet_file: default_spreadsheet_file(),
            chart_file: default_chart_file(),
            report_file: default_report_file(),
            open_report: true,
            print: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("book-scout.toml");
        if local_config.exists() {
            debug!("Found book-scout.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("book-scout").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("BOOK_SCOUT_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("BOOK_SCOUT_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(dir) = std::env::var("BOOK_SCOUT_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }

        self
    }

    pub fn spreadsheet_path(&self) -> PathBuf {
        self.output_dir.join(&self.spreadsheet_file)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

/// Output format for the terminal listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

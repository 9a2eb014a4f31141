//! book-scout - compare book listings across catalog sites from the terminal

use anyhow::{Context, Result};
use book_scout::commands::SearchCommand;
use book_scout::config::{Config, OutputFormat};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "book-scout",
    version,
    about = "Search book catalogs and export a price comparison report",
    long_about = "Searches five book catalog sites for a title or keyword, then writes an Excel \
                  sheet, a bar chart of results per site, and a PDF summary report."
)]
struct Cli {
    /// Book title or keyword (prompted for when omitted)
    query: Vec<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the spreadsheet, chart and report
    #[arg(short, long, env = "BOOK_SCOUT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "BOOK_SCOUT_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, env = "BOOK_SCOUT_DELAY")]
    delay: Option<u64>,

    /// Also list the combined records on stdout
    #[arg(short, long)]
    print: Option<OutputFormat>,

    /// Don't open the PDF report when done
    #[arg(long)]
    no_open: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if cli.print.is_some() {
        config.print = cli.print;
    }
    if cli.no_open {
        config.open_report = false;
    }

    let query = if cli.query.is_empty() {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter book title or keyword")
            .interact_text()
            .context("Failed to read search query")?
    } else {
        cli.query.join(" ")
    };

    println!("Searching...");

    let report = SearchCommand::new(config).execute(&query).await?;
    println!("{}", report);

    Ok(())
}

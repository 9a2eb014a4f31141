//! PDF summary report: heading, chart, per-source counts and every record.

use super::{ExportError, Exporter};
use crate::aggregator::Aggregation;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::image_crate::ImageDecoder;
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const REPORT_TITLE: &str = "Book Price Comparison Report";

// A4, millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const LINE_HEIGHT: f32 = 6.0;

const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;

const CHART_X: f32 = 30.0;
const CHART_WIDTH: f32 = 150.0;

/// Characters per wrapped body line at `BODY_SIZE`.
const WRAP_WIDTH: usize = 95;

/// Writes the PDF report, embedding the chart when its file exists.
pub struct ReportExporter {
    path: PathBuf,
    chart_path: PathBuf,
}

impl ReportExporter {
    pub fn new(path: impl Into<PathBuf>, chart_path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), chart_path: chart_path.into() }
    }

    pub fn write(&self, aggregation: &Aggregation) -> Result<(), ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(report_error)?;
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(report_error)?;

        let mut layer = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - MARGIN - 5.0;

        layer.use_text(
            REPORT_TITLE,
            HEADING_SIZE,
            Mm(centered_x(REPORT_TITLE, HEADING_SIZE)),
            Mm(y),
            &bold,
        );
        y -= LINE_HEIGHT * 2.0;

        if self.chart_path.is_file() {
            match load_png(&self.chart_path) {
                Ok((image, width, height)) => {
                    y -= CHART_WIDTH * height as f32 / width as f32;
                    image.add_to_layer(
                        layer.clone(),
                        ImageTransform {
                            translate_x: Some(Mm(CHART_X)),
                            translate_y: Some(Mm(y)),
                            dpi: Some(width as f32 * 25.4 / CHART_WIDTH),
                            ..Default::default()
                        },
                    );
                    y -= LINE_HEIGHT;
                }
                Err(e) => warn!("Leaving chart out of report: {}", e),
            }
        } else {
            debug!("No chart at {}, report will not embed it", self.chart_path.display());
        }

        for line in report_lines(aggregation) {
            for chunk in wrap_text(&pdf_safe(&line), WRAP_WIDTH) {
                if y < MARGIN {
                    let (page, page_layer) =
                        doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                    layer = doc.get_page(page).get_layer(page_layer);
                    y = PAGE_HEIGHT - MARGIN;
                }
                layer.use_text(chunk, BODY_SIZE, Mm(MARGIN), Mm(y), &regular);
                y -= LINE_HEIGHT;
            }
        }

        let file = File::create(&self.path)
            .map_err(|source| ExportError::Io { path: self.path.clone(), source })?;
        doc.save(&mut BufWriter::new(file)).map_err(report_error)?;

        Ok(())
    }
}

impl Exporter for ReportExporter {
    fn kind(&self) -> &'static str {
        "Report"
    }

    fn export(&self, aggregation: &Aggregation) -> Result<PathBuf, ExportError> {
        self.write(aggregation)?;
        Ok(self.path.clone())
    }
}

/// Body lines before wrapping: one count per source, then one per record.
pub fn report_lines(aggregation: &Aggregation) -> Vec<String> {
    let summary = aggregation
        .tally
        .iter()
        .map(|(source, count)| format!("{}: {} books found", source, count));

    summary.chain(aggregation.records.iter().map(|r| r.report_line())).collect()
}

/// Maps text onto the printable ASCII the built-in PDF fonts render.
pub fn pdf_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            '£' => out.push_str("GBP "),
            '€' => out.push_str("EUR "),
            '‘' | '’' => out.push('\''),
            '“' | '”' => out.push('"'),
            '–' | '—' => out.push('-'),
            '…' => out.push_str("..."),
            '\t' | '\n' | '\r' | '\u{a0}' => out.push(' '),
            c if c == ' ' || c.is_ascii_graphic() => out.push(c),
            _ => out.push('?'),
        }
    }

    out
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() { word.len() } else { current.chars().count() + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Rough x offset centring `text` in Helvetica Bold.
fn centered_x(text: &str, size: f32) -> f32 {
    let width_mm = text.chars().count() as f32 * size * 0.55 * 25.4 / 72.0;
    ((PAGE_WIDTH - width_mm) / 2.0).max(MARGIN)
}

fn load_png(path: &Path) -> Result<(Image, u32, u32), ExportError> {
    let file =
        File::open(path).map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    let decoder = PngDecoder::new(BufReader::new(file)).map_err(report_error)?;
    let (width, height) = decoder.dimensions();
    let image = Image::try_from(decoder).map_err(report_error)?;

    Ok((image, width, height))
}

fn report_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Report(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{SourceOutcome, SourceTally};
    use crate::catalog::{BookRecord, Source, FREE, NOT_AVAILABLE};
    use crate::export::ChartExporter;

    fn aggregation(records: Vec<BookRecord>) -> Aggregation {
        let mut tally = SourceTally::new();
        let mut outcomes = Vec::new();
        for source in Source::all() {
            let count = records.iter().filter(|r| r.source == *source).count();
            tally.record(*source, count);
            outcomes.push((*source, SourceOutcome::Found(count)));
        }
        Aggregation { query: "python".to_string(), records, tally, outcomes }
    }

    fn sample() -> Aggregation {
        aggregation(vec![
            BookRecord::new("Python Basics", NOT_AVAILABLE, "₹12.50", Source::BooksToScrape),
            BookRecord::new("Think Python", "Allen Downey", FREE, Source::Gutenberg),
        ])
    }

    #[test]
    fn test_report_lines() {
        let lines = report_lines(&sample());

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "BooksToScrape: 1 books found");
        assert_eq!(lines[1], "OpenLibrary: 0 books found");
        assert_eq!(lines[2], "Gutenberg: 1 books found");
        assert_eq!(lines[5], "- Python Basics | Author: N/A | Price: ₹12.50 | BooksToScrape");
        assert_eq!(lines[6], "- Think Python | Author: Allen Downey | Price: Free | Gutenberg");
    }

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("Price: ₹12.50"), "Price: Rs.12.50");
        assert_eq!(pdf_safe("£5 – “quoted”"), "GBP 5 - \"quoted\"");
        assert_eq!(pdf_safe("Les Misérables"), "Les Mis?rables");
        assert_eq!(pdf_safe("三体"), "??");
        assert_eq!(pdf_safe("plain ascii"), "plain ascii");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("short", 80), vec!["short"]);
        assert_eq!(wrap_text("", 80), vec![""]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a abcdefgh", 4), vec!["a", "abcd", "efgh"]);

        for line in wrap_text(&"lorem ipsum ".repeat(40), 30) {
            assert!(line.chars().count() <= 30);
        }
    }

    #[test]
    fn test_write_without_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        ReportExporter::new(&path, dir.path().join("graph.png")).write(&sample()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_with_chart() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("graph.png");
        let path = dir.path().join("report.pdf");
        let aggregation = sample();

        ChartExporter::new(&chart).render(&aggregation.tally).unwrap();
        ReportExporter::new(&path, &chart).write(&aggregation).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unreadable_chart_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let chart = dir.path().join("graph.png");
        std::fs::write(&chart, "not a png").unwrap();
        let path = dir.path().join("report.pdf");

        ReportExporter::new(&path, &chart).write(&sample()).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_many_records_span_pages() {
        let records: Vec<BookRecord> = (0..120)
            .map(|i| BookRecord::new(format!("Python Volume {}", i), "Anon", FREE, Source::Gutenberg))
            .collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");

        ReportExporter::new(&path, dir.path().join("graph.png"))
            .write(&aggregation(records))
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

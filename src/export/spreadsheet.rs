//! Excel workbook with one row per record.

use super::{ExportError, Exporter};
use crate::aggregator::Aggregation;
use crate::catalog::BookRecord;
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tracing::debug;

/// Column headers, in sheet order.
pub const HEADERS: [&str; 4] = ["Title", "Author", "Price", "Website"];

const COLUMN_WIDTHS: [f64; 4] = [60.0, 30.0, 12.0, 18.0];

/// Writes the combined records to an `.xlsx` file.
pub struct SpreadsheetExporter {
    path: PathBuf,
}

impl SpreadsheetExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes the header and one row per record; returns the data row count.
    pub fn write(&self, records: &[BookRecord]) -> Result<usize, ExportError> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Books")?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header)?;
            worksheet.set_column_width(col as u16, COLUMN_WIDTHS[col])?;
        }

        let rows = sheet_rows(records);
        for (i, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                worksheet.write_string(i as u32 + 1, col as u16, value)?;
            }
        }

        workbook.save(&self.path)?;
        debug!("Wrote {} rows to {}", rows.len(), self.path.display());

        Ok(rows.len())
    }
}

impl Exporter for SpreadsheetExporter {
    fn kind(&self) -> &'static str {
        "Spreadsheet"
    }

    fn export(&self, aggregation: &Aggregation) -> Result<PathBuf, ExportError> {
        self.write(&aggregation.records)?;
        Ok(self.path.clone())
    }
}

/// Cell values for each record, matching [`HEADERS`].
pub fn sheet_rows(records: &[BookRecord]) -> Vec<[String; 4]> {
    records
        .iter()
        .map(|r| {
            [r.title.clone(), r.author.clone(), r.price.clone(), r.source.name().to_string()]
        })
        .collect()
}

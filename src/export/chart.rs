//! Bar chart of records found per source.

use super::{ExportError, Exporter};
use crate::aggregator::{Aggregation, SourceTally};
use plotters::prelude::*;
use std::path::PathBuf;
use tracing::warn;

pub const CHART_TITLE: &str = "Books Found per Website";

const BAR_COLOR: RGBColor = RGBColor(0, 128, 0);

/// Renders the source tally as a PNG bar chart.
pub struct ChartExporter {
    path: PathBuf,
    size: (u32, u32),
}

impl ChartExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), size: (600, 400) }
    }

    /// Draws one bar per tally entry, zero counts included.
    ///
    /// Text needs a system font; without one the bars are drawn unlabeled.
    pub fn render(&self, tally: &SourceTally) -> Result<(), ExportError> {
        match self.draw(tally, true) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("{}; drawing chart without labels", e);
                self.draw(tally, false)
            }
        }
    }

    fn draw(&self, tally: &SourceTally, labels: bool) -> Result<(), ExportError> {
        let names: Vec<&str> = tally.iter().map(|(source, _)| source.name()).collect();
        let bars = bar_heights(tally);
        let y_max = bars.iter().copied().max().unwrap_or(0).max(1) + 1;

        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(15);
        if labels {
            builder.caption(CHART_TITLE, ("sans-serif", 22)).x_label_area_size(40).y_label_area_size(45);
        }

        let mut chart = builder
            .build_cartesian_2d((0..names.len()).into_segmented(), 0u32..y_max)
            .map_err(chart_error)?;

        if labels {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc("Count")
                .x_labels(names.len())
                .x_label_formatter(&|value| match value {
                    SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                        names.get(*i).map(|n| n.to_string()).unwrap_or_default()
                    }
                    SegmentValue::Last => String::new(),
                })
                .label_style(("sans-serif", 12))
                .draw()
                .map_err(chart_error)?;
        }

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(12)
                    .data(bars.iter().enumerate().map(|(i, count)| (i, *count))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;

        Ok(())
    }
}

impl Exporter for ChartExporter {
    fn kind(&self) -> &'static str {
        "Chart"
    }

    fn export(&self, aggregation: &Aggregation) -> Result<PathBuf, ExportError> {
        self.render(&aggregation.tally)?;
        Ok(self.path.clone())
    }
}

/// Bar heights in tally order.
pub fn bar_heights(tally: &SourceTally) -> Vec<u32> {
    tally.iter().map(|(_, count)| u32::try_from(count).unwrap_or(u32::MAX)).collect()
}

fn chart_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Chart(e.to_string())
}

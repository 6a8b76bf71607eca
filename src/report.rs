// Run summary: per-metric min/mean/max and a fixed-width preview of the first rows.

use std::fmt::Write;

use crate::models::{CSV_TIMESTAMP_FORMAT, Metric, MetricRecord};
use crate::writer::csv_header;

pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub metric: Metric,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// One summary per metric, in draw order. Empty input yields an empty list.
pub fn summarize(records: &[MetricRecord]) -> Vec<MetricSummary> {
    if records.is_empty() {
        return Vec::new();
    }
    Metric::ALL
        .iter()
        .map(|&metric| {
            let values = records.iter().map(|r| metric.value_of(r));
            let min = values.clone().fold(f64::INFINITY, f64::min);
            let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
            let mean = values.sum::<f64>() / records.len() as f64;
            MetricSummary {
                metric,
                min,
                mean,
                max,
            }
        })
        .collect()
}

/// Renders up to `rows` records as a right-aligned text table with a header line.
pub fn preview_table(records: &[MetricRecord], rows: usize) -> String {
    let header = csv_header();
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    let cells: Vec<Vec<String>> = records
        .iter()
        .take(rows)
        .map(|r| {
            std::iter::once(r.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string())
                .chain(Metric::ALL.iter().map(|m| format!("{:.2}", m.value_of(r))))
                .collect()
        })
        .collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header_cells).chain(cells.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  "));
    }
    out
}

// One run: build range and seeded generator from config, generate, feed every selected writer.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::error::Result;
use crate::generator::Generator;
use crate::models::MetricRecord;
use crate::report;
use crate::writer::{MetricWriter, writers_for};

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub records: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    pub written: Vec<PathBuf>,
    /// First rows rendered as a text table.
    pub preview: String,
}

/// Generates the records described by `config` without writing anything.
pub fn generate(config: &AppConfig) -> Result<Vec<MetricRecord>> {
    let range = config.hourly_range()?;
    let mut generator = Generator::seeded(config.generator.seed, config.generator.base_tps);
    Ok(generator.generate(&range))
}

/// Generates once and writes with the writers `output.format` selects.
#[instrument(skip(config), fields(seed = config.generator.seed, format = ?config.output.format))]
pub fn run(config: &AppConfig) -> Result<RunReport> {
    let records = generate(config)?;
    for s in report::summarize(&records) {
        info!(
            metric = %s.metric,
            min = s.min,
            mean = %format!("{:.2}", s.mean),
            max = s.max,
            "metric summary"
        );
    }

    let writers = writers_for(config);
    let written = write_all(&writers, &records)?;

    Ok(RunReport {
        records: records.len(),
        first: records.first().map(|r| r.timestamp),
        last: records.last().map(|r| r.timestamp),
        written,
        preview: report::preview_table(&records, report::PREVIEW_ROWS),
    })
}

/// Runs each writer in order; the first failure aborts the run.
pub fn write_all(
    writers: &[Box<dyn MetricWriter>],
    records: &[MetricRecord],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for w in writers {
        let paths = w.write(records)?;
        info!(writer = w.name(), files = paths.len(), "output written");
        written.extend(paths);
    }
    Ok(written)
}

// Output writers: one CSV table, or one JSON document per metric.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::config::AppConfig;
use crate::error::{GenError, Result};
use crate::models::{CSV_TIMESTAMP_FORMAT, Metric, MetricRecord, MetricSeries};

pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Serializes a full set of records. Returns the paths written.
pub trait MetricWriter {
    fn name(&self) -> &'static str;
    fn write(&self, records: &[MetricRecord]) -> Result<Vec<PathBuf>>;
}

/// Builds the writers selected by `output.format`, CSV first.
pub fn writers_for(config: &AppConfig) -> Vec<Box<dyn MetricWriter>> {
    let mut writers: Vec<Box<dyn MetricWriter>> = Vec::new();
    if config.output.format.includes_csv() {
        writers.push(Box::new(CsvWriter::new(&config.output.csv_path)));
    }
    if config.output.format.includes_json() {
        writers.push(Box::new(JsonWriter::new(
            &config.output.json_dir,
            config.range.start.format("%Y").to_string(),
        )));
    }
    writers
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| GenError::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// Header row for the table: Timestamp then every metric name.
pub fn csv_header() -> Vec<&'static str> {
    std::iter::once(TIMESTAMP_COLUMN)
        .chain(Metric::ALL.iter().map(|m| m.name()))
        .collect()
}

pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetricWriter for CsvWriter {
    fn name(&self) -> &'static str {
        "csv"
    }

    #[instrument(skip(self, records), fields(path = %self.path.display(), rows = records.len()))]
    fn write(&self, records: &[MetricRecord]) -> Result<Vec<PathBuf>> {
        let mut wtr = csv::Writer::from_writer(create_file(&self.path)?);
        wtr.write_record(csv_header())?;
        for r in records {
            let mut row = Vec::with_capacity(Metric::ALL.len() + 1);
            row.push(r.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string());
            row.extend(Metric::ALL.iter().map(|m| format!("{:.2}", m.value_of(r))));
            wtr.write_record(&row)?;
        }
        wtr.flush().map_err(|e| GenError::io(&self.path, e))?;
        Ok(vec![self.path.clone()])
    }
}

pub struct JsonWriter {
    dir: PathBuf,
    label: String,
}

impl JsonWriter {
    /// Files are named `<MetricName>_<label>.json` inside `dir`.
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
        }
    }

    pub fn path_for(&self, metric: Metric) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", metric.name(), self.label))
    }
}

impl MetricWriter for JsonWriter {
    fn name(&self) -> &'static str {
        "json"
    }

    #[instrument(skip(self, records), fields(dir = %self.dir.display(), points = records.len()))]
    fn write(&self, records: &[MetricRecord]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|e| GenError::io(&self.dir, e))?;
        let mut written = Vec::with_capacity(Metric::ALL.len());
        for metric in Metric::ALL {
            let path = self.path_for(metric);
            let series = MetricSeries::from_records(metric, records);
            let mut out = create_file(&path)?;
            serde_json::to_writer_pretty(&mut out, &series)?;
            out.flush().map_err(|e| GenError::io(&path, e))?;
            tracing::debug!(metric = %metric, path = %path.display(), "metric file written");
            written.push(path);
        }
        Ok(written)
    }
}

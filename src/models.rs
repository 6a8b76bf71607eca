// Domain models: metric names, per-hour records, per-metric series

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp text used in the CSV table.
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp text used in JSON data points (ISO-8601, no zone).
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The five generated metrics, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Tps,
    ResponseTime,
    Cpu,
    Memory,
    JvmHeap,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Tps,
        Metric::ResponseTime,
        Metric::Cpu,
        Metric::Memory,
        Metric::JvmHeap,
    ];

    /// Column header and JSON `metricName`.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Tps => "TPS",
            Metric::ResponseTime => "ResponseTime_ms",
            Metric::Cpu => "CPU_%",
            Metric::Memory => "Memory_%",
            Metric::JvmHeap => "JVM_Heap_%",
        }
    }

    pub fn value_of(self, record: &MetricRecord) -> f64 {
        match self {
            Metric::Tps => record.tps,
            Metric::ResponseTime => record.response_time_ms,
            Metric::Cpu => record.cpu_percent,
            Metric::Memory => record.memory_percent,
            Metric::JvmHeap => record.jvm_heap_percent,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One generated hour: all five metrics, already rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRecord {
    pub timestamp: NaiveDateTime,
    pub tps: f64,
    pub response_time_ms: f64,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub jvm_heap_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(with = "iso_timestamp")]
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Per-metric JSON document: `{ "metricName": .., "dataPoints": [..] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub metric_name: String,
    pub data_points: Vec<DataPoint>,
}

impl MetricSeries {
    /// Projects one metric out of the records, keeping chronological order.
    pub fn from_records(metric: Metric, records: &[MetricRecord]) -> Self {
        Self {
            metric_name: metric.name().to_string(),
            data_points: records
                .iter()
                .map(|r| DataPoint {
                    timestamp: r.timestamp,
                    value: metric.value_of(r),
                })
                .collect(),
        }
    }
}

mod iso_timestamp {
    use super::ISO_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(ISO_TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&s, ISO_TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

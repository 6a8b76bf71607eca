// Writer tests: CSV layout, JSON documents, directory creation, failures

mod common;

use common::ts;
use loadgen_metrics::GenError;
use loadgen_metrics::generator::Generator;
use loadgen_metrics::models::{Metric, MetricRecord, MetricSeries};
use loadgen_metrics::timeline::HourlyRange;
use loadgen_metrics::writer::{CsvWriter, JsonWriter, MetricWriter};

fn sample_records() -> Vec<MetricRecord> {
    let range = HourlyRange::new(ts(2024, 1, 1, 0), ts(2024, 1, 1, 23), 1).unwrap();
    Generator::seeded(42, 150.0).generate(&range)
}

#[test]
fn test_csv_header_and_rows() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("metrics.csv");
    let records = sample_records();

    let written = CsvWriter::new(&path).write(&records).unwrap();
    assert_eq!(written, vec![path.clone()]);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Timestamp,TPS,ResponseTime_ms,CPU_%,Memory_%,JVM_Heap_%")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("2024-01-01 00:00:00,"));
    assert_eq!(first.split(',').count(), 6);
    assert_eq!(text.lines().count(), records.len() + 1);
}

#[test]
fn test_csv_values_parse_back() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("metrics.csv");
    let records = sample_records();
    CsvWriter::new(&path).write(&records).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    for (row, expected) in reader.records().zip(&records) {
        let row = row.unwrap();
        let tps: f64 = row[1].parse().unwrap();
        let cpu: f64 = row[3].parse().unwrap();
        assert_eq!(tps, expected.tps);
        assert_eq!(cpu, expected.cpu_percent);
    }
}

#[test]
fn test_csv_overwrites_existing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("metrics.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "stale content that should disappear\n".repeat(1000)).unwrap();

    let records = sample_records();
    CsvWriter::new(&path).write(&records).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), records.len() + 1);
}

#[test]
fn test_csv_creates_missing_parent_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("metrics.csv");
    CsvWriter::new(&path).write(&sample_records()).unwrap();
    assert!(path.is_file());
}

#[test]
fn test_json_writes_five_documents() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("appd_metrics_json");
    let records = sample_records();

    let written = JsonWriter::new(&out, "2024").write(&records).unwrap();
    assert_eq!(written.len(), 5);
    for metric in Metric::ALL {
        let path = out.join(format!("{}_2024.json", metric.name()));
        assert!(written.contains(&path), "missing {}", path.display());

        let text = std::fs::read_to_string(&path).unwrap();
        let series: MetricSeries = serde_json::from_str(&text).unwrap();
        assert_eq!(series.metric_name, metric.name());
        assert_eq!(series.data_points.len(), records.len());
        for (p, r) in series.data_points.iter().zip(&records) {
            assert_eq!(p.timestamp, r.timestamp);
            assert_eq!(p.value, metric.value_of(r));
        }
    }
}

#[test]
fn test_json_document_shape() {
    let dir = tempfile::TempDir::new().unwrap();
    let records = sample_records();
    let writer = JsonWriter::new(dir.path(), "2024");
    writer.write(&records).unwrap();

    let text = std::fs::read_to_string(writer.path_for(Metric::Tps)).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["metricName"], "TPS");
    let points = doc["dataPoints"].as_array().unwrap();
    assert_eq!(points[0]["timestamp"], "2024-01-01T00:00:00");
    assert_eq!(points[1]["timestamp"], "2024-01-01T01:00:00");
    assert!(points[0]["value"].is_f64());
    assert!(text.contains("\n  \"dataPoints\""), "expected 2-space indent");
}

#[test]
fn test_json_fails_when_output_dir_is_a_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "x").unwrap();

    let err = JsonWriter::new(&blocker, "2024")
        .write(&sample_records())
        .unwrap_err();
    match err {
        GenError::Io { path, .. } => assert_eq!(path, blocker),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_csv_fails_when_parent_is_a_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let err = CsvWriter::new(blocker.join("metrics.csv"))
        .write(&sample_records())
        .unwrap_err();
    assert!(matches!(err, GenError::Io { .. }));
    assert!(err.to_string().contains("blocker"));
}

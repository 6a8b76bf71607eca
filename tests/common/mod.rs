// Shared test helpers

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use loadgen_metrics::config::{AppConfig, OutputFormat};
use std::path::Path;

pub fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// Config writing into `dir`, for the given range, seed and format.
pub fn config_in(
    dir: &Path,
    start: NaiveDateTime,
    end: NaiveDateTime,
    seed: u64,
    format: OutputFormat,
) -> AppConfig {
    let mut config = AppConfig::default();
    config.range.start = start;
    config.range.end = end;
    config.generator.seed = seed;
    config.output.format = format;
    config.output.csv_path = dir.join("login_service_metrics_2024.csv");
    config.output.json_dir = dir.join("appd_metrics_json");
    config
}

pub fn full_year_config(dir: &Path, seed: u64) -> AppConfig {
    config_in(
        dir,
        ts(2024, 1, 1, 0),
        ts(2024, 12, 31, 23),
        seed,
        OutputFormat::Both,
    )
}

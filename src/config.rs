use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::timeline::HourlyRange;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub range: RangeConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_start")]
    pub start: NaiveDateTime,
    #[serde(default = "default_end")]
    pub end: NaiveDateTime,
    #[serde(default = "default_step_hours")]
    pub step_hours: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            step_hours: default_step_hours(),
        }
    }
}

fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 0, 0))
        .unwrap_or_default()
}

fn default_step_hours() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Baseline transactions/sec before seasonal and daily multipliers.
    #[serde(default = "default_base_tps")]
    pub base_tps: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            base_tps: default_base_tps(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

fn default_base_tps() -> f64 {
    150.0
}

/// Which writers a run feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// Directory for the per-metric JSON files; created if missing.
    #[serde(default = "default_json_dir")]
    pub json_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            csv_path: default_csv_path(),
            json_dir: default_json_dir(),
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("login_service_metrics_2024.csv")
}

fn default_json_dir() -> PathBuf {
    PathBuf::from("appd_metrics_json")
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing default file yields built-in defaults;
    /// a missing file named explicitly by `CONFIG_FILE` is an error.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(p) => Self::load_from_path(Path::new(&p), true),
            Err(_) => Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }

    /// Reads and validates the file at `path`. When `required` is false a missing file
    /// yields `AppConfig::default()`.
    pub fn load_from_path(path: &Path, required: bool) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config file not found, using built-in defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("reading config {}: {}", path.display(), e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.range.end >= self.range.start,
            "range.end ({}) must not be before range.start ({})",
            self.range.end,
            self.range.start
        );
        anyhow::ensure!(
            self.range.step_hours > 0,
            "range.step_hours must be > 0, got {}",
            self.range.step_hours
        );
        anyhow::ensure!(
            self.generator.base_tps.is_finite() && self.generator.base_tps > 0.0,
            "generator.base_tps must be a positive number, got {}",
            self.generator.base_tps
        );
        anyhow::ensure!(
            !self.output.csv_path.as_os_str().is_empty(),
            "output.csv_path must be non-empty"
        );
        anyhow::ensure!(
            !self.output.json_dir.as_os_str().is_empty(),
            "output.json_dir must be non-empty"
        );
        Ok(())
    }

    /// Timestamp sequence described by `[range]`.
    pub fn hourly_range(&self) -> Result<HourlyRange> {
        HourlyRange::new(self.range.start, self.range.end, self.range.step_hours)
    }
}

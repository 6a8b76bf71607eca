// Synthetic metric generation: seasonal/daily load shape plus seeded noise.
//
// Draw order per timestamp is fixed: TPS (uniform), then ResponseTime, CPU, Memory,
// JVM heap (one standard-normal draw each). Changing it changes every value after it.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::instrument;

use crate::models::MetricRecord;
use crate::timeline::HourlyRange;

pub const RESPONSE_TIME_FLOOR_MS: f64 = 80.0;
pub const CPU_BOUNDS: (f64, f64) = (5.0, 95.0);
pub const MEMORY_BOUNDS: (f64, f64) = (30.0, 90.0);
pub const JVM_HEAP_BOUNDS: (f64, f64) = (20.0, 95.0);

const TPS_NOISE: std::ops::Range<f64> = 0.85..1.15;
const RESPONSE_TIME_BASE_MS: f64 = 400.0;
const RESPONSE_TIME_STD: f64 = 30.0;
const CPU_STD: f64 = 5.0;
const MEMORY_BASE: f64 = 60.0;
const MEMORY_STD: f64 = 3.0;
const JVM_HEAP_STD: f64 = 5.0;

/// Monthly demand multiplier: holiday peak Nov-Jan, summer peak May-Jul.
pub fn seasonal_factor(month: u32) -> f64 {
    match month {
        11 | 12 | 1 => 1.4,
        5..=7 => 1.3,
        _ => 1.0,
    }
}

/// Hour-of-day multiplier: morning 7-11 average, 11-13 peak, otherwise off-peak.
pub fn daily_load(hour: u32) -> f64 {
    match hour {
        7..=10 => 1.0,
        11..=12 => 1.6,
        _ => 0.7,
    }
}

/// Rounds to 2 decimal places from the exact binary value, the same way `{:.2}` prints it,
/// so CSV text and JSON numbers always agree.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

pub struct Generator<R: Rng> {
    rng: R,
    base_tps: f64,
}

impl Generator<StdRng> {
    pub fn seeded(seed: u64, base_tps: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), base_tps)
    }
}

impl<R: Rng> Generator<R> {
    pub fn new(rng: R, base_tps: f64) -> Self {
        Self { rng, base_tps }
    }

    /// Computes one record. Correlations use unrounded values; rounding happens last.
    pub fn sample(&mut self, timestamp: NaiveDateTime) -> MetricRecord {
        let season = seasonal_factor(timestamp.month());
        let daily = daily_load(timestamp.hour());

        let tps = self.base_tps * season * daily * self.rng.gen_range(TPS_NOISE);

        let response_time = self
            .normal(RESPONSE_TIME_BASE_MS - tps / 3.0, RESPONSE_TIME_STD)
            .max(RESPONSE_TIME_FLOOR_MS);

        let cpu = self
            .normal(tps / 5.0, CPU_STD)
            .clamp(CPU_BOUNDS.0, CPU_BOUNDS.1);

        let memory = self
            .normal(MEMORY_BASE + tps / 50.0, MEMORY_STD)
            .clamp(MEMORY_BOUNDS.0, MEMORY_BOUNDS.1);

        let jvm_heap = self
            .normal(memory * 0.8 + cpu * 0.2, JVM_HEAP_STD)
            .clamp(JVM_HEAP_BOUNDS.0, JVM_HEAP_BOUNDS.1);

        MetricRecord {
            timestamp,
            tps: round2(tps),
            response_time_ms: round2(response_time),
            cpu_percent: round2(cpu),
            memory_percent: round2(memory),
            jvm_heap_percent: round2(jvm_heap),
        }
    }

    /// One record per timestamp in the range, in order.
    #[instrument(skip(self, range), fields(start = %range.start(), end = %range.end(), points = range.len()))]
    pub fn generate(&mut self, range: &HourlyRange) -> Vec<MetricRecord> {
        let mut records = Vec::with_capacity(range.len());
        for ts in range {
            records.push(self.sample(ts));
        }
        tracing::debug!(records = records.len(), "generation complete");
        records
    }

    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonal_factor_by_month() {
        for m in [11, 12, 1] {
            assert_eq!(seasonal_factor(m), 1.4);
        }
        for m in [5, 6, 7] {
            assert_eq!(seasonal_factor(m), 1.3);
        }
        for m in [2, 3, 4, 8, 9, 10] {
            assert_eq!(seasonal_factor(m), 1.0);
        }
    }

    #[test]
    fn daily_load_boundaries() {
        assert_eq!(daily_load(6), 0.7);
        assert_eq!(daily_load(7), 1.0);
        assert_eq!(daily_load(10), 1.0);
        assert_eq!(daily_load(11), 1.6);
        assert_eq!(daily_load(12), 1.6);
        assert_eq!(daily_load(13), 0.7);
        assert_eq!(daily_load(0), 0.7);
        assert_eq!(daily_load(23), 0.7);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(80.0), 80.0);
    }

    #[test]
    fn round2_does_not_round_twice() {
        // 1.115 is stored as 1.11499...
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(format!("{:.2}", round2(1.115)), format!("{:.2}", 1.115));
    }
}

// Hourly timestamp sequence: [start, end] inclusive, fixed step, ascending.

use chrono::{Duration, NaiveDateTime};

use crate::error::{GenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl HourlyRange {
    /// Fails when end is before start or step_hours is zero.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, step_hours: u32) -> Result<Self> {
        if step_hours == 0 {
            return Err(GenError::Config("step_hours must be > 0".into()));
        }
        if end < start {
            return Err(GenError::Config(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self {
            start,
            end,
            step: Duration::hours(i64::from(step_hours)),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Number of timestamps the range yields (end included when it lands on a step).
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_seconds();
        (span / self.step.num_seconds()) as usize + 1
    }

    /// Never true: a valid range always contains its start.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> HourlyIter {
        HourlyIter {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }
}

impl IntoIterator for &HourlyRange {
    type Item = NaiveDateTime;
    type IntoIter = HourlyIter;

    fn into_iter(self) -> HourlyIter {
        self.iter()
    }
}

pub struct HourlyIter {
    next: Option<NaiveDateTime>,
    end: NaiveDateTime,
    step: Duration,
}

impl Iterator for HourlyIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        let current = self.next?;
        self.next = current
            .checked_add_signed(self.step)
            .filter(|ts| *ts <= self.end);
        Some(current)
    }
}

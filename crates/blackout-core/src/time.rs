//! Equally spaced time axis for availability traces.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{BlackoutError, BlackoutResult};

/// Start of the time axis when only an evaluated day count is given.
pub const REFERENCE_DATE: (i32, u32, u32) = (2024, 1, 1);

pub const SECONDS_PER_HOUR: i64 = 3600;

/// Ordered, equally spaced timestamps spanning an evaluation window.
///
/// Stored as `start + i * step` rather than a materialized vector; the index
/// is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIndex {
    start: NaiveDateTime,
    step_seconds: i64,
    len: usize,
}

impl TimeIndex {
    /// Build an index of `len` timestamps, `step_seconds` apart.
    pub fn new(start: NaiveDateTime, step_seconds: i64, len: usize) -> BlackoutResult<Self> {
        if step_seconds <= 0 {
            return Err(BlackoutError::invalid(
                "step_seconds",
                format!("timestep must be positive, got {step_seconds}"),
            ));
        }
        if len == 0 {
            return Err(BlackoutError::invalid(
                "len",
                "time index must contain at least one timestamp",
            ));
        }
        // the last timestamp bounds every other one
        let last_offset = i64::try_from(len - 1)
            .ok()
            .and_then(|steps| steps.checked_mul(step_seconds))
            .and_then(Duration::try_seconds);
        if last_offset
            .and_then(|offset| start.checked_add_signed(offset))
            .is_none()
        {
            return Err(BlackoutError::invalid(
                "len",
                format!(
                    "{len} timestamps {step_seconds} s apart from {start} run past the supported date range"
                ),
            ));
        }
        Ok(Self {
            start,
            step_seconds,
            len,
        })
    }

    /// Hourly index of `len` steps.
    pub fn hourly(start: NaiveDateTime, len: usize) -> BlackoutResult<Self> {
        Self::new(start, SECONDS_PER_HOUR, len)
    }

    /// Hourly index covering `days` full days from [`REFERENCE_DATE`].
    pub fn from_evaluated_days(days: u32) -> BlackoutResult<Self> {
        Self::hourly(reference_start()?, days as usize * 24)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn step_seconds(&self) -> i64 {
        self.step_seconds
    }

    /// Timestep expressed in hours
    pub fn step_hours(&self) -> f64 {
        self.step_seconds as f64 / SECONDS_PER_HOUR as f64
    }

    /// Total span covered by the index, counting each timestamp as one step.
    pub fn total_hours(&self) -> f64 {
        self.len as f64 * self.step_hours()
    }

    /// Length of the window in (possibly fractional) days.
    pub fn span_days(&self) -> f64 {
        self.total_hours() / 24.0
    }

    pub fn timestamp(&self, idx: usize) -> Option<NaiveDateTime> {
        (idx < self.len).then(|| self.start + Duration::seconds(self.step_seconds * idx as i64))
    }

    pub fn last(&self) -> NaiveDateTime {
        self.start + Duration::seconds(self.step_seconds * (self.len as i64 - 1))
    }

    /// Position of `ts` in the index, if it lies exactly on the grid.
    pub fn position(&self, ts: NaiveDateTime) -> Option<usize> {
        let offset = (ts - self.start).num_seconds();
        if offset < 0 || offset % self.step_seconds != 0 {
            return None;
        }
        let idx = (offset / self.step_seconds) as usize;
        (idx < self.len).then_some(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        (0..self.len).map(move |i| self.start + Duration::seconds(self.step_seconds * i as i64))
    }

    /// Hour of day (0..23) of every timestamp, in index order.
    pub fn hours_of_day(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|ts| ts.hour())
    }

    /// Zero-based calendar month (0..11) of every timestamp, in index order.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|ts| ts.month0())
    }
}

fn reference_start() -> BlackoutResult<NaiveDateTime> {
    let (year, month, day) = REFERENCE_DATE;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| BlackoutError::invalid("reference_date", "not a calendar date"))
}

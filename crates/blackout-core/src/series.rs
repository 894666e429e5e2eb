//! Availability trace and blackout event types.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{BlackoutError, BlackoutResult};

/// One drawn blackout: a start on the time index and a quantized duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackoutEvent {
    /// Start timestamp (always a member of the time index)
    pub start: NaiveDateTime,
    /// Position of `start` in the time index
    pub start_index: usize,
    /// Duration in hours, a nonnegative multiple of the timestep
    pub duration_hours: f64,
    /// Duration in timesteps
    pub duration_steps: usize,
}

/// Grid availability per timestamp: 1 = available, 0 = outage.
///
/// Values can only be set at construction. The compositor builds the buffer
/// once and hands out this read-only view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AvailabilitySeries {
    values: Vec<u8>,
}

/// A maximal run of consecutive outage timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutageRun {
    pub start_index: usize,
    pub len: usize,
}

impl AvailabilitySeries {
    /// Series with the grid available at every one of `len` timestamps.
    pub fn all_available(len: usize) -> Self {
        Self {
            values: vec![1; len],
        }
    }

    /// Wrap existing 0/1 values, rejecting anything else.
    pub fn from_values(values: Vec<u8>) -> BlackoutResult<Self> {
        if let Some(pos) = values.iter().position(|&v| v > 1) {
            return Err(BlackoutError::invalid(
                "availability",
                format!("value {} at position {} is not 0 or 1", values[pos], pos),
            ));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<u8> {
        self.values.get(idx).copied()
    }

    /// Number of timestamps with the grid available
    pub fn available_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }

    /// Number of timestamps in outage
    pub fn outage_count(&self) -> usize {
        self.len() - self.available_count()
    }

    /// Consecutive outage stretches in index order.
    pub fn outage_runs(&self) -> Vec<OutageRun> {
        let mut runs = Vec::new();
        let mut run_start: Option<usize> = None;
        for (idx, &value) in self.values.iter().enumerate() {
            match (value == 0, run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start_index)) => {
                    runs.push(OutageRun {
                        start_index,
                        len: idx - start_index,
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start_index) = run_start {
            runs.push(OutageRun {
                start_index,
                len: self.values.len() - start_index,
            });
        }
        runs
    }

    /// Values as `f64` multipliers, the form a downstream flow bound expects.
    pub fn as_multipliers(&self) -> Vec<f64> {
        self.values.iter().map(|&v| f64::from(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_rejects_non_binary() {
        assert!(AvailabilitySeries::from_values(vec![1, 0, 1]).is_ok());
        let err = AvailabilitySeries::from_values(vec![1, 2]).unwrap_err();
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn counts_partition_the_series() {
        let series = AvailabilitySeries::from_values(vec![1, 0, 0, 1, 0]).unwrap();
        assert_eq!(series.available_count(), 2);
        assert_eq!(series.outage_count(), 3);
        assert_eq!(series.available_count() + series.outage_count(), series.len());
    }

    #[test]
    fn outage_runs_cover_edges() {
        let series = AvailabilitySeries::from_values(vec![0, 0, 1, 1, 0, 1, 0, 0, 0]).unwrap();
        assert_eq!(
            series.outage_runs(),
            vec![
                OutageRun { start_index: 0, len: 2 },
                OutageRun { start_index: 4, len: 1 },
                OutageRun { start_index: 6, len: 3 },
            ]
        );
        assert!(AvailabilitySeries::all_available(5).outage_runs().is_empty());
    }

    #[test]
    fn multipliers_match_values() {
        let series = AvailabilitySeries::from_values(vec![1, 0]).unwrap();
        assert_eq!(series.as_multipliers(), vec![1.0, 0.0]);
    }
}

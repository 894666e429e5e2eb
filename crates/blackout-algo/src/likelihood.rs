//! Time-of-day and month-of-year likelihood profiles.
//!
//! Users describe when blackouts tend to start with a sparse table of hour
//! ranges, e.g. "evenings from 17 to 20 are the worst". [`build_hourly_weights`]
//! expands that table into a dense [`HourlyWeightMap`] with one weight per
//! hour of the day, rejecting tables that leave gaps or double-book hours.
//!
//! Weights are relative: only their ratios matter to the sampler.

use blackout_core::{BlackoutError, BlackoutResult};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;
pub const MONTHS_PER_YEAR: usize = 12;

/// Weight for the half-open hour range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodRange {
    pub start: i32,
    pub end: i32,
    pub weight: f64,
}

impl LikelihoodRange {
    pub const fn new(start: i32, end: i32, weight: f64) -> Self {
        Self { start, end, weight }
    }
}

/// Sparse hour-range table; ranges must partition the day exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyLikelihoodTable {
    pub ranges: Vec<LikelihoodRange>,
}

/// Default profile: quiet nights and afternoons, peaks at midday and evening.
pub const DEFAULT_DAILY_LIKELIHOOD: [LikelihoodRange; 6] = [
    LikelihoodRange::new(0, 6, 9.0),
    LikelihoodRange::new(6, 11, 10.0),
    LikelihoodRange::new(11, 14, 14.0),
    LikelihoodRange::new(14, 17, 8.0),
    LikelihoodRange::new(17, 20, 15.0),
    LikelihoodRange::new(20, 24, 9.0),
];

impl HourlyLikelihoodTable {
    pub fn new(ranges: Vec<LikelihoodRange>) -> Self {
        Self { ranges }
    }

    /// Same weight for every hour of the day.
    pub fn uniform() -> Self {
        Self::new(vec![LikelihoodRange::new(0, HOURS_PER_DAY as i32, 1.0)])
    }
}

impl Default for HourlyLikelihoodTable {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_LIKELIHOOD.to_vec())
    }
}

/// Dense weight per hour of day (0..23), always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyWeightMap {
    weights: [f64; HOURS_PER_DAY],
}

impl HourlyWeightMap {
    /// Weight for `hour`; hours past 23 wrap around the day.
    pub fn weight(&self, hour: u32) -> f64 {
        self.weights[hour as usize % HOURS_PER_DAY]
    }

    pub fn as_array(&self) -> &[f64; HOURS_PER_DAY] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(|(hour, &weight)| (hour as u32, weight))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Expand a sparse hour-range table into a dense 24-hour weight map.
///
/// Ranges are processed in table order. The first range reaching outside the
/// day or assigning an already assigned hour aborts the build; uncovered
/// hours are reported together once every range has been applied.
pub fn build_hourly_weights(table: &HourlyLikelihoodTable) -> BlackoutResult<HourlyWeightMap> {
    let mut assigned: [Option<f64>; HOURS_PER_DAY] = [None; HOURS_PER_DAY];

    for range in &table.ranges {
        if range.start < 0 || range.end > HOURS_PER_DAY as i32 || range.start >= range.end {
            return Err(BlackoutError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
            });
        }
        if !range.weight.is_finite() || range.weight < 0.0 {
            return Err(BlackoutError::InvalidWeight {
                context: format!("hours [{}, {})", range.start, range.end),
                weight: range.weight,
            });
        }
        for hour in range.start..range.end {
            let slot = &mut assigned[hour as usize];
            if slot.is_some() {
                return Err(BlackoutError::DuplicateHourAssignment { hour: hour as u32 });
            }
            *slot = Some(range.weight);
        }
    }

    let missing: Vec<u32> = assigned
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.is_none())
        .map(|(hour, _)| hour as u32)
        .collect();
    if !missing.is_empty() {
        return Err(BlackoutError::MissingHourCoverage { hours: missing });
    }

    let mut weights = [0.0; HOURS_PER_DAY];
    for (weight, slot) in weights.iter_mut().zip(assigned) {
        *weight = slot.unwrap_or_default();
    }
    Ok(HourlyWeightMap { weights })
}

/// Relative blackout likelihood per calendar month (January first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyLikelihood {
    weights: [f64; MONTHS_PER_YEAR],
}

impl MonthlyLikelihood {
    pub fn new(weights: [f64; MONTHS_PER_YEAR]) -> BlackoutResult<Self> {
        let profile = Self { weights };
        profile.validate()?;
        Ok(profile)
    }

    pub fn uniform() -> Self {
        Self {
            weights: [1.0; MONTHS_PER_YEAR],
        }
    }

    /// Weight for a zero-based month (0 = January).
    pub fn weight(&self, month0: u32) -> f64 {
        self.weights[month0 as usize % MONTHS_PER_YEAR]
    }

    pub fn as_array(&self) -> &[f64; MONTHS_PER_YEAR] {
        &self.weights
    }

    pub fn validate(&self) -> BlackoutResult<()> {
        for (month0, &weight) in self.weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(BlackoutError::InvalidWeight {
                    context: format!("month {}", month0 + 1),
                    weight,
                });
            }
        }
        Ok(())
    }
}

impl Default for MonthlyLikelihood {
    fn default() -> Self {
        Self::uniform()
    }
}

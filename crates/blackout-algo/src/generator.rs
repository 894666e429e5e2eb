//! End-to-end blackout trace generation.

use blackout_core::{
    AvailabilitySeries, BlackoutError, BlackoutEvent, BlackoutResult, Diagnostics, TimeIndex,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::compositor::composite_availability;
use crate::duration::{assign_durations, QuantizedDuration};
use crate::event_count::estimate_event_count;
use crate::likelihood::{build_hourly_weights, HourlyLikelihoodTable, MonthlyLikelihood};
use crate::sampler::sample_event_times;

pub const DEFAULT_STD_FREQUENCY: f64 = 0.1;
pub const DEFAULT_STD_DURATION: f64 = 0.1;

/// Statistical description of the blackouts to synthesize.
///
/// Exactly one of `time_index` and `evaluated_days` must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct BlackoutParams {
    /// Mean number of blackouts per month
    pub average_frequency: f64,
    /// Mean blackout duration in hours
    pub average_duration: f64,
    pub time_index: Option<TimeIndex>,
    pub evaluated_days: Option<u32>,
    pub daily_likelihood: HourlyLikelihoodTable,
    pub monthly_likelihood: MonthlyLikelihood,
    /// Standard deviation of the monthly frequency, as a fraction of the mean
    pub std_frequency: f64,
    /// Standard deviation of the duration, as a fraction of the mean
    pub std_duration: f64,
}

impl BlackoutParams {
    pub fn new(average_frequency: f64, average_duration: f64) -> Self {
        Self {
            average_frequency,
            average_duration,
            time_index: None,
            evaluated_days: None,
            daily_likelihood: HourlyLikelihoodTable::default(),
            monthly_likelihood: MonthlyLikelihood::default(),
            std_frequency: DEFAULT_STD_FREQUENCY,
            std_duration: DEFAULT_STD_DURATION,
        }
    }

    /// Builder: evaluate over an explicit time index
    pub fn with_time_index(mut self, index: TimeIndex) -> Self {
        self.time_index = Some(index);
        self
    }

    /// Builder: evaluate `days` hourly days from the reference date
    pub fn with_evaluated_days(mut self, days: u32) -> Self {
        self.evaluated_days = Some(days);
        self
    }

    pub fn with_daily_likelihood(mut self, table: HourlyLikelihoodTable) -> Self {
        self.daily_likelihood = table;
        self
    }

    pub fn with_monthly_likelihood(mut self, profile: MonthlyLikelihood) -> Self {
        self.monthly_likelihood = profile;
        self
    }

    pub fn with_std_frequency(mut self, std: f64) -> Self {
        self.std_frequency = std;
        self
    }

    pub fn with_std_duration(mut self, std: f64) -> Self {
        self.std_duration = std;
        self
    }

    /// Check the statistical parameters are usable
    pub fn validate(&self) -> BlackoutResult<()> {
        let checks = [
            ("average_frequency", self.average_frequency),
            ("average_duration", self.average_duration),
            ("std_frequency", self.std_frequency),
            ("std_duration", self.std_duration),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(BlackoutError::invalid(
                    name,
                    format!("must be finite and nonnegative, got {value}"),
                ));
            }
        }
        self.monthly_likelihood.validate()
    }

    /// The evaluation window, from whichever time specification was given.
    pub fn resolve_time_index(&self) -> BlackoutResult<TimeIndex> {
        match (&self.time_index, self.evaluated_days) {
            (Some(index), None) => Ok(index.clone()),
            (None, Some(days)) => TimeIndex::from_evaluated_days(days),
            (None, None) => Err(BlackoutError::MissingTimeSpecification),
            (Some(_), Some(_)) => Err(BlackoutError::AmbiguousTimeSpecification),
        }
    }
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub time_index: TimeIndex,
    pub series: AvailabilitySeries,
    /// Events in chronological order, each paired with its duration
    pub events: Vec<BlackoutEvent>,
    /// Durations in hours, aligned with `events`
    pub durations: Vec<f64>,
    pub overlap_count: usize,
    pub clean_event_count: usize,
    pub diagnostics: Diagnostics,
}

impl GenerationResult {
    /// Number of drawn events (`N`)
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Random source seeded for reproducibility, or from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

/// Synthesize a blackout trace from frequency, duration and likelihood statistics.
///
/// Stages run in a fixed order, each consuming `rng`:
/// 1. expand the daily likelihood table into per-hour weights
/// 2. draw the event count from twelve monthly frequencies
/// 3. draw distinct start times weighted by hour (and month)
/// 4. draw one duration per event
/// 5. composite the events latest-first onto an all-available series
///
/// Durations are drawn in a single batch and paired positionally with the
/// start times after those are sorted, so `durations[i]` always belongs to
/// the `i`-th earliest event.
pub fn generate_blackout_events<R: Rng + ?Sized>(
    params: &BlackoutParams,
    rng: &mut R,
) -> BlackoutResult<GenerationResult> {
    params.validate()?;
    let time_index = params.resolve_time_index()?;
    let hourly = build_hourly_weights(&params.daily_likelihood)?;

    let count = estimate_event_count(
        params.average_frequency,
        params.std_frequency,
        time_index.span_days(),
        rng,
    )?;
    let starts = sample_event_times(
        &time_index,
        &hourly,
        &params.monthly_likelihood,
        count,
        rng,
    )?;
    let draws = assign_durations(
        params.average_duration,
        params.std_duration,
        count,
        time_index.step_hours(),
        rng,
    )?;

    let events = pair_events(&time_index, &starts, &draws.durations)?;
    let composite = composite_availability(time_index.len(), &events)?;

    let mut diagnostics = Diagnostics::new();
    if draws.clamped > 0 {
        diagnostics.add_warning(
            "duration",
            &format!(
                "{} of {} drawn durations were negative and clamped to zero",
                draws.clamped, count
            ),
        );
    }

    debug!(
        timestamps = time_index.len(),
        events = events.len(),
        outage_steps = composite.series.outage_count(),
        "generated blackout trace"
    );

    Ok(GenerationResult {
        durations: events.iter().map(|e| e.duration_hours).collect(),
        time_index,
        series: composite.series,
        events,
        overlap_count: composite.overlap_count,
        clean_event_count: composite.clean_event_count,
        diagnostics,
    })
}

fn pair_events(
    index: &TimeIndex,
    starts: &[usize],
    durations: &[QuantizedDuration],
) -> BlackoutResult<Vec<BlackoutEvent>> {
    starts
        .iter()
        .zip(durations)
        .map(|(&start_index, duration)| {
            let start = index.timestamp(start_index).ok_or_else(|| {
                BlackoutError::invalid("events", format!("start position {start_index} out of range"))
            })?;
            Ok(BlackoutEvent {
                start,
                start_index,
                duration_hours: duration.hours,
                duration_steps: duration.steps,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_specification_must_be_exactly_one() {
        let params = BlackoutParams::new(4.0, 3.0);
        assert_eq!(
            params.resolve_time_index(),
            Err(BlackoutError::MissingTimeSpecification)
        );

        let both = params
            .clone()
            .with_evaluated_days(3)
            .with_time_index(TimeIndex::from_evaluated_days(3).unwrap());
        assert_eq!(
            both.resolve_time_index(),
            Err(BlackoutError::AmbiguousTimeSpecification)
        );

        let days = params.with_evaluated_days(2);
        assert_eq!(days.resolve_time_index().unwrap().len(), 48);
    }

    #[test]
    fn negative_statistics_are_rejected() {
        let params = BlackoutParams::new(-1.0, 3.0).with_evaluated_days(3);
        let mut rng = seeded_rng(Some(1));
        assert!(matches!(
            generate_blackout_events(&params, &mut rng),
            Err(BlackoutError::InvalidParameter {
                name: "average_frequency",
                ..
            })
        ));

        let params = BlackoutParams::new(1.0, 3.0)
            .with_std_duration(f64::NAN)
            .with_evaluated_days(3);
        assert!(generate_blackout_events(&params, &mut rng).is_err());
    }

    #[test]
    fn pairing_follows_chronological_order() {
        let index = TimeIndex::from_evaluated_days(1).unwrap();
        let durations = [
            QuantizedDuration { steps: 1, hours: 1.0 },
            QuantizedDuration { steps: 2, hours: 2.0 },
        ];
        let events = pair_events(&index, &[3, 10], &durations).unwrap();
        assert_eq!(events[0].start_index, 3);
        assert_eq!(events[0].duration_steps, 1);
        assert_eq!(events[1].start_index, 10);
        assert_eq!(events[1].duration_steps, 2);
        assert_eq!(events[1].start, index.timestamp(10).unwrap());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a: u64 = seeded_rng(Some(9)).gen();
        let b: u64 = seeded_rng(Some(9)).gen();
        assert_eq!(a, b);
    }
}

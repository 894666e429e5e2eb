//! Weighted draw of distinct blackout start times.

use blackout_core::{BlackoutError, BlackoutResult, TimeIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::likelihood::{HourlyWeightMap, MonthlyLikelihood};

/// Sampling weight of every timestamp: hour-of-day weight times month weight.
pub fn timestamp_weights(
    index: &TimeIndex,
    hourly: &HourlyWeightMap,
    monthly: &MonthlyLikelihood,
) -> Vec<f64> {
    index
        .hours_of_day()
        .zip(index.months())
        .map(|(hour, month0)| hourly.weight(hour) * monthly.weight(month0))
        .collect()
}

/// Draw `count` distinct positions of `index` without replacement.
///
/// Selection is proportional to [`timestamp_weights`] (Efraimidis-Spirakis
/// weighted keys). Timestamps with zero weight can never be drawn, so they do
/// not count towards the population available for `count`.
///
/// Returns positions in ascending time order.
pub fn sample_event_times<R: Rng + ?Sized>(
    index: &TimeIndex,
    hourly: &HourlyWeightMap,
    monthly: &MonthlyLikelihood,
    count: usize,
    rng: &mut R,
) -> BlackoutResult<Vec<usize>> {
    if count > index.len() {
        return Err(BlackoutError::InsufficientPopulation {
            requested: count,
            available: index.len(),
        });
    }

    let candidates: Vec<(usize, f64)> = timestamp_weights(index, hourly, monthly)
        .into_iter()
        .enumerate()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    if count > candidates.len() {
        return Err(BlackoutError::InsufficientPopulation {
            requested: count,
            available: candidates.len(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut starts: Vec<usize> = candidates
        .choose_multiple_weighted(rng, count, |(_, weight)| *weight)
        .map_err(|err| BlackoutError::Sampling(format!("event start times: {err}")))?
        .map(|(idx, _)| *idx)
        .collect();
    starts.sort_unstable();

    debug!(
        requested = count,
        candidates = candidates.len(),
        "sampled blackout start times"
    );
    Ok(starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::{build_hourly_weights, HourlyLikelihoodTable, LikelihoodRange};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn index(days: u32) -> TimeIndex {
        TimeIndex::from_evaluated_days(days).unwrap()
    }

    fn default_hourly() -> HourlyWeightMap {
        build_hourly_weights(&HourlyLikelihoodTable::default()).unwrap()
    }

    #[test]
    fn draws_are_distinct_sorted_and_in_range() {
        let index = index(3);
        let mut rng = StdRng::seed_from_u64(42);
        let starts = sample_event_times(
            &index,
            &default_hourly(),
            &MonthlyLikelihood::uniform(),
            40,
            &mut rng,
        )
        .unwrap();
        assert_eq!(starts.len(), 40);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
        assert!(starts.iter().all(|&s| s < index.len()));
        let unique: HashSet<_> = starts.iter().collect();
        assert_eq!(unique.len(), 40);
    }

    #[test]
    fn whole_population_can_be_drawn() {
        let index = index(1);
        let mut rng = StdRng::seed_from_u64(5);
        let starts = sample_event_times(
            &index,
            &default_hourly(),
            &MonthlyLikelihood::uniform(),
            24,
            &mut rng,
        )
        .unwrap();
        assert_eq!(starts, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn too_many_events_is_insufficient_population() {
        let index = index(1);
        let mut rng = StdRng::seed_from_u64(5);
        let err = sample_event_times(
            &index,
            &default_hourly(),
            &MonthlyLikelihood::uniform(),
            25,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BlackoutError::InsufficientPopulation {
                requested: 25,
                available: 24
            }
        );
    }

    #[test]
    fn zero_weight_hours_are_never_drawn() {
        let table = HourlyLikelihoodTable::new(vec![
            LikelihoodRange::new(0, 12, 0.0),
            LikelihoodRange::new(12, 24, 1.0),
        ]);
        let hourly = build_hourly_weights(&table).unwrap();
        let index = index(10);
        let mut rng = StdRng::seed_from_u64(9);
        let starts =
            sample_event_times(&index, &hourly, &MonthlyLikelihood::uniform(), 100, &mut rng)
                .unwrap();
        assert!(starts.iter().all(|&s| s % 24 >= 12));

        // 10 days * 12 usable hours
        let err = sample_event_times(&index, &hourly, &MonthlyLikelihood::uniform(), 121, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            BlackoutError::InsufficientPopulation {
                requested: 121,
                available: 120
            }
        );
    }

    #[test]
    fn selection_follows_hour_weights() {
        // Hour 0 is nine times as likely as any other hour
        let table = HourlyLikelihoodTable::new(vec![
            LikelihoodRange::new(0, 1, 9.0),
            LikelihoodRange::new(1, 24, 1.0),
        ]);
        let hourly = build_hourly_weights(&table).unwrap();
        let index = index(30);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut midnight = 0usize;
        let draws = 2000;
        for _ in 0..draws {
            let starts =
                sample_event_times(&index, &hourly, &MonthlyLikelihood::uniform(), 1, &mut rng)
                    .unwrap();
            if starts[0] % 24 == 0 {
                midnight += 1;
            }
        }
        // P(hour 0) = 9 / (9 + 23) = 0.28
        let share = midnight as f64 / draws as f64;
        assert!((share - 0.28125).abs() < 0.04, "midnight share {share}");
    }

    #[test]
    fn month_weights_scale_timestamps() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let index = TimeIndex::hourly(start, 48).unwrap();
        let mut months = [1.0; 12];
        months[0] = 0.0;
        let monthly = MonthlyLikelihood::new(months).unwrap();
        let weights = timestamp_weights(&index, &default_hourly(), &monthly);
        assert!(weights[..24].iter().all(|&w| w == 0.0));
        assert_eq!(weights[24], 9.0);

        let mut rng = StdRng::seed_from_u64(1);
        let starts = sample_event_times(&index, &default_hourly(), &monthly, 10, &mut rng).unwrap();
        assert!(starts.iter().all(|&s| s >= 24));
    }

    #[test]
    fn same_seed_same_draw() {
        let index = index(7);
        let hourly = default_hourly();
        let monthly = MonthlyLikelihood::uniform();
        let a = sample_event_times(&index, &hourly, &monthly, 12, &mut StdRng::seed_from_u64(8))
            .unwrap();
        let b = sample_event_times(&index, &hourly, &monthly, 12, &mut StdRng::seed_from_u64(8))
            .unwrap();
        assert_eq!(a, b);
    }
}

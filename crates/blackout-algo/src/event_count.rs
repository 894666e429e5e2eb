//! Number of blackout events to place in the evaluation window.

use blackout_core::{BlackoutError, BlackoutResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::likelihood::MONTHS_PER_YEAR;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Draw the event count for a window of `evaluated_days` days.
///
/// One frequency is drawn per calendar month from
/// `Normal(average_frequency, average_frequency * std_frequency)`, which adds
/// month-to-month variability on top of the per-event randomness. All twelve
/// draws are converted to daily rates and summed over the window:
///
/// ```text
/// N = floor(evaluated_days * Σ_m draw_m / 365)
/// ```
///
/// The fractional remainder is discarded and a negative sum yields 0. This is
/// the first stage that consumes randomness; seed `rng` before calling it
/// when the whole run must be reproducible.
pub fn estimate_event_count<R: Rng + ?Sized>(
    average_frequency: f64,
    std_frequency: f64,
    evaluated_days: f64,
    rng: &mut R,
) -> BlackoutResult<usize> {
    if !evaluated_days.is_finite() || evaluated_days < 0.0 {
        return Err(BlackoutError::invalid(
            "evaluated_days",
            format!("must be finite and nonnegative, got {evaluated_days}"),
        ));
    }
    let normal = Normal::new(average_frequency, average_frequency * std_frequency)
        .map_err(|err| BlackoutError::Sampling(format!("monthly frequency: {err}")))?;

    let daily_rate: f64 = (0..MONTHS_PER_YEAR)
        .map(|_| normal.sample(rng) / DAYS_PER_YEAR)
        .sum();
    let expected = daily_rate * evaluated_days;
    let count = if expected > 0.0 {
        expected.floor() as usize
    } else {
        0
    };

    debug!(
        daily_rate,
        evaluated_days, expected, count, "estimated blackout event count"
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_frequency_gives_no_events() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(estimate_event_count(0.0, 0.1, 365.0, &mut rng).unwrap(), 0);
    }

    #[test]
    fn zero_variance_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        // 12 * 4 / 365 * 100 = 13.15 -> truncated
        assert_eq!(estimate_event_count(4.0, 0.0, 100.0, &mut rng).unwrap(), 13);
        // 12 * 40 / 365 * 3 = 3.94 -> truncated
        assert_eq!(estimate_event_count(40.0, 0.0, 3.0, &mut rng).unwrap(), 3);
        // 12 * 4 / 365 * 3 = 0.39 -> truncated
        assert_eq!(estimate_event_count(4.0, 0.0, 3.0, &mut rng).unwrap(), 0);
    }

    #[test]
    fn same_seed_same_count() {
        let a = estimate_event_count(6.0, 0.5, 200.0, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = estimate_event_count(6.0, 0.5, 200.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn variance_stays_near_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let runs = 500;
        let total: usize = (0..runs)
            .map(|_| estimate_event_count(10.0, 0.1, 365.0, &mut rng).unwrap())
            .sum();
        let mean = total as f64 / runs as f64;
        // expected 120/year, minus ~0.5 on average from truncation
        assert!((mean - 119.5).abs() < 2.0, "mean event count {mean}");
    }

    #[test]
    fn rejects_bad_window() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(estimate_event_count(1.0, 0.1, -1.0, &mut rng).is_err());
        assert!(estimate_event_count(1.0, 0.1, f64::NAN, &mut rng).is_err());
    }
}

//! Blackout durations drawn from a normal distribution.

use blackout_core::{BlackoutError, BlackoutResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use tracing::{debug, warn};

/// A duration rounded to a whole number of timesteps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantizedDuration {
    pub steps: usize,
    pub hours: f64,
}

/// Durations in draw order plus how many draws were negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationDraws {
    pub durations: Vec<QuantizedDuration>,
    /// Draws that rounded below zero and were clamped to zero steps
    pub clamped: usize,
}

/// Draw `count` durations from `Normal(average_duration, average_duration * std_duration)`.
///
/// Each draw is rounded to the nearest multiple of `step_hours`. A draw that
/// rounds below zero is clamped to zero timesteps: the event keeps its slot
/// (and its probe window in the compositor) but paints no outage.
pub fn assign_durations<R: Rng + ?Sized>(
    average_duration: f64,
    std_duration: f64,
    count: usize,
    step_hours: f64,
    rng: &mut R,
) -> BlackoutResult<DurationDraws> {
    if !step_hours.is_finite() || step_hours <= 0.0 {
        return Err(BlackoutError::invalid(
            "step_hours",
            format!("timestep must be positive, got {step_hours}"),
        ));
    }
    let normal = Normal::new(average_duration, average_duration * std_duration)
        .map_err(|err| BlackoutError::Sampling(format!("event duration: {err}")))?;

    let mut clamped = 0;
    let durations = (0..count)
        .map(|_| {
            let steps = (normal.sample(rng) / step_hours).round();
            let steps = if steps < 0.0 {
                clamped += 1;
                0
            } else {
                steps as usize
            };
            QuantizedDuration {
                steps,
                hours: steps as f64 * step_hours,
            }
        })
        .collect();

    if clamped > 0 {
        warn!(clamped, count, "negative blackout durations clamped to zero");
    }
    debug!(count, average_duration, step_hours, "assigned blackout durations");
    Ok(DurationDraws { durations, clamped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_variance_gives_exact_durations() {
        let mut rng = StdRng::seed_from_u64(0);
        let draws = assign_durations(3.0, 0.0, 5, 1.0, &mut rng).unwrap();
        assert_eq!(draws.durations.len(), 5);
        assert!(draws
            .durations
            .iter()
            .all(|d| d.steps == 3 && d.hours == 3.0));
        assert_eq!(draws.clamped, 0);
    }

    #[test]
    fn durations_are_multiples_of_the_step() {
        let mut rng = StdRng::seed_from_u64(4);
        let draws = assign_durations(2.3, 0.4, 200, 0.25, &mut rng).unwrap();
        for d in &draws.durations {
            assert_eq!(d.hours, d.steps as f64 * 0.25);
        }
    }

    #[test]
    fn rounding_to_nearest_step() {
        let mut rng = StdRng::seed_from_u64(0);
        // 1.4 h on a one hour grid rounds down, 1.6 h rounds up
        assert_eq!(
            assign_durations(1.4, 0.0, 1, 1.0, &mut rng).unwrap().durations[0].steps,
            1
        );
        assert_eq!(
            assign_durations(1.6, 0.0, 1, 1.0, &mut rng).unwrap().durations[0].steps,
            2
        );
        // sub-step durations may round to zero
        assert_eq!(
            assign_durations(0.4, 0.0, 1, 1.0, &mut rng).unwrap().durations[0].steps,
            0
        );
    }

    #[test]
    fn negative_draws_are_clamped() {
        // Mean 1h with a 300% spread goes negative roughly a third of the time
        let mut rng = StdRng::seed_from_u64(17);
        let draws = assign_durations(1.0, 3.0, 500, 1.0, &mut rng).unwrap();
        assert!(draws.clamped > 0);
        assert!(draws.durations.iter().all(|d| d.hours >= 0.0));
    }

    #[test]
    fn zero_count_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        let draws = assign_durations(3.0, 0.1, 0, 1.0, &mut rng).unwrap();
        assert!(draws.durations.is_empty());
    }

    #[test]
    fn rejects_bad_step() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(assign_durations(3.0, 0.1, 1, 0.0, &mut rng).is_err());
    }
}

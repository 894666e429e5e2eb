//! Painting blackout events onto a single availability timeline.
//!
//! Events are applied latest first. Each event probes the inclusive window
//! `[start, start + duration]` (one step past its own outage) before painting
//! `[start, start + duration - step]`:
//!
//! ```text
//! index     0 1 2 3 4 5 6 7
//! event B           [# #]        start 5, 2 steps, probe 5..=7
//! event A     [# # #]            start 1, 3 steps, probe 1..=4
//! ```
//!
//! B is processed first and finds its window untouched: clean. A is then
//! processed; its probe reaches index 4, still available, so A is clean too.
//! Had A lasted 4 steps its probe would hit index 5, already painted by B,
//! and A would count as overlapping. Because the scan runs backwards in time,
//! an event only "sees" events that start after it; the counts depend on
//! this direction.

use blackout_core::{AvailabilitySeries, BlackoutError, BlackoutEvent, BlackoutResult};
use serde::Serialize;
use tracing::debug;

/// Availability timeline plus overlap bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composite {
    pub series: AvailabilitySeries,
    pub overlap_count: usize,
    pub clean_event_count: usize,
}

/// Composite `events` onto a timeline of `len` timestamps, initially all available.
///
/// Events may be given in any order; they are processed by descending start.
/// The outage interval is painted regardless of the overlap outcome and is
/// cut at the end of the timeline. A probe window that runs past the end is
/// judged on the timestamps that exist.
///
/// When every event overlapped another, the clean count is raised to one.
pub fn composite_availability(len: usize, events: &[BlackoutEvent]) -> BlackoutResult<Composite> {
    if let Some(event) = events.iter().find(|e| e.start_index >= len) {
        return Err(BlackoutError::invalid(
            "events",
            format!(
                "event start position {} lies outside a timeline of {} timestamps",
                event.start_index, len
            ),
        ));
    }

    let mut order: Vec<&BlackoutEvent> = events.iter().collect();
    order.sort_by_key(|e| e.start_index);

    let mut values = vec![1u8; len];
    let mut overlap_count = 0;
    let mut clean_event_count = 0;

    for event in order.into_iter().rev() {
        let start = event.start_index;
        let end = start.saturating_add(event.duration_steps);
        let probe_end = end.min(len - 1);
        let probe = &values[start..=probe_end];
        let available: usize = probe.iter().map(|&v| usize::from(v)).sum();
        if available == probe.len() {
            clean_event_count += 1;
        } else {
            overlap_count += 1;
        }

        if event.duration_steps > 0 {
            let paint_end = (end - 1).min(len - 1);
            values[start..=paint_end].fill(0);
        }
    }

    if clean_event_count == 0 && overlap_count > 0 {
        clean_event_count = 1;
    }

    debug!(
        events = events.len(),
        clean_event_count, overlap_count, "composited blackout events"
    );

    Ok(Composite {
        series: AvailabilitySeries::from_values(values)?,
        overlap_count,
        clean_event_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(start_index: usize, duration_steps: usize) -> BlackoutEvent {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        BlackoutEvent {
            start: base + chrono::Duration::hours(start_index as i64),
            start_index,
            duration_steps,
            duration_hours: duration_steps as f64,
        }
    }

    #[test]
    fn no_events_leaves_series_available() {
        let composite = composite_availability(10, &[]).unwrap();
        assert_eq!(composite.series.available_count(), 10);
        assert_eq!(composite.overlap_count, 0);
        assert_eq!(composite.clean_event_count, 0);
    }

    #[test]
    fn separated_events_are_clean() {
        let composite = composite_availability(8, &[event(1, 3), event(5, 2)]).unwrap();
        assert_eq!(composite.series.values(), &[1, 0, 0, 0, 1, 0, 0, 1]);
        assert_eq!(composite.clean_event_count, 2);
        assert_eq!(composite.overlap_count, 0);
    }

    #[test]
    fn probe_reaching_a_later_event_counts_as_overlap() {
        // A ends exactly where B starts: A's probe includes B's first step
        let composite = composite_availability(8, &[event(1, 4), event(5, 2)]).unwrap();
        assert_eq!(composite.series.values(), &[1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(composite.clean_event_count, 1);
        assert_eq!(composite.overlap_count, 1);
    }

    #[test]
    fn overlapping_intervals_merge() {
        let composite = composite_availability(12, &[event(2, 5), event(4, 3)]).unwrap();
        assert_eq!(composite.series.outage_count(), 5);
        assert_eq!(composite.overlap_count, 1);
        assert_eq!(composite.clean_event_count, 1);
    }

    #[test]
    fn processing_order_ignores_input_order() {
        let forward = composite_availability(12, &[event(2, 5), event(4, 3)]).unwrap();
        let backward = composite_availability(12, &[event(4, 3), event(2, 5)]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn zero_duration_paints_nothing_but_is_counted() {
        let composite = composite_availability(5, &[event(2, 0)]).unwrap();
        assert_eq!(composite.series.outage_count(), 0);
        assert_eq!(composite.clean_event_count, 1);
    }

    #[test]
    fn painting_stops_at_timeline_end() {
        let composite = composite_availability(6, &[event(4, 5)]).unwrap();
        assert_eq!(composite.series.values(), &[1, 1, 1, 1, 0, 0]);
        assert_eq!(composite.clean_event_count, 1);
    }

    #[test]
    fn clean_plus_overlap_equals_event_count() {
        let events: Vec<_> = (0..10).map(|i| event(i * 3, 4)).collect();
        let composite = composite_availability(40, &events).unwrap();
        assert_eq!(
            composite.clean_event_count + composite.overlap_count,
            events.len()
        );
        // every event but the last runs into its successor
        assert_eq!(composite.overlap_count, 9);
    }

    #[test]
    fn oversized_duration_is_cut_at_timeline_end() {
        let composite =
            composite_availability(6, &[event(1, usize::MAX), event(3, usize::MAX)]).unwrap();
        assert_eq!(composite.series.values(), &[1, 0, 0, 0, 0, 0]);
        assert_eq!(composite.clean_event_count, 1);
        assert_eq!(composite.overlap_count, 1);
    }

    #[test]
    fn start_outside_timeline_is_rejected() {
        assert!(composite_availability(4, &[event(4, 1)]).is_err());
    }
}

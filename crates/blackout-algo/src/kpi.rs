//! Reliability KPIs derived from an availability trace.

use blackout_core::{AvailabilitySeries, BlackoutError, BlackoutResult, Diagnostics};
use serde::Serialize;
use tracing::info;

use crate::generator::GenerationResult;

/// KPIs that depend only on the availability trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityKpis {
    /// Fraction of time with the grid available, in [0, 1]
    pub reliability: f64,
    pub total_hours: f64,
    pub total_outage_hours: f64,
    /// Maximal stretches of consecutive outage timestamps
    pub blackout_intervals: usize,
    pub longest_blackout_hours: f64,
}

/// Full KPI set for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiResult {
    #[serde(flatten)]
    pub availability: AvailabilityKpis,
    /// Sum of the individually drawn durations
    pub intended_outage_hours: f64,
    pub event_count: usize,
    pub clean_event_count: usize,
    pub overlap_count: usize,
    /// True when realized outage equals the sum of intended durations
    pub reconciled: bool,
    pub diagnostics: Diagnostics,
}

impl KpiResult {
    pub fn reliability(&self) -> f64 {
        self.availability.reliability
    }

    pub fn total_outage_hours(&self) -> f64 {
        self.availability.total_outage_hours
    }
}

/// Compute KPIs for a trace read from disk or produced elsewhere.
pub fn availability_kpis(
    series: &AvailabilitySeries,
    step_hours: f64,
) -> BlackoutResult<AvailabilityKpis> {
    if series.is_empty() {
        return Err(BlackoutError::invalid(
            "availability",
            "series contains no timestamps",
        ));
    }
    if !step_hours.is_finite() || step_hours <= 0.0 {
        return Err(BlackoutError::invalid(
            "step_hours",
            format!("timestep must be positive, got {step_hours}"),
        ));
    }
    Ok(series_kpis(series, step_hours))
}

fn series_kpis(series: &AvailabilitySeries, step_hours: f64) -> AvailabilityKpis {
    let total_steps = series.len();
    let outage_steps = total_steps - series.available_count();
    let runs = series.outage_runs();
    let longest = runs.iter().map(|run| run.len).max().unwrap_or(0);

    let reliability = if total_steps == 0 {
        1.0
    } else {
        1.0 - outage_steps as f64 / total_steps as f64
    };

    AvailabilityKpis {
        reliability,
        total_hours: total_steps as f64 * step_hours,
        total_outage_hours: outage_steps as f64 * step_hours,
        blackout_intervals: runs.len(),
        longest_blackout_hours: longest as f64 * step_hours,
    }
}

/// Derive reliability KPIs from a generation run.
///
/// Realized outage time is compared against the sum of the drawn durations.
/// Overlapping events, or events cut at the end of the window, make the two
/// disagree; that is reported as an informational notice, never an error.
pub fn compute_blackout_kpis(result: &GenerationResult) -> KpiResult {
    let step_hours = result.time_index.step_hours();
    let availability = series_kpis(&result.series, step_hours);

    let intended_steps = result
        .events
        .iter()
        .fold(0usize, |acc, e| acc.saturating_add(e.duration_steps));
    let outage_steps = result.series.outage_count();
    let intended_outage_hours: f64 = result.events.iter().map(|e| e.duration_hours).sum();
    let reconciled = intended_steps == outage_steps;

    let mut diagnostics = Diagnostics::new();
    diagnostics.merge(result.diagnostics.clone());
    if !reconciled {
        info!(
            realized_hours = availability.total_outage_hours,
            intended_hours = intended_outage_hours,
            overlaps = result.overlap_count,
            "realized outage differs from the sum of drawn durations"
        );
        diagnostics.add_info(
            "reconciliation",
            &format!(
                "realized outage of {:.2} h differs from {:.2} h of drawn durations ({} overlapping events)",
                availability.total_outage_hours, intended_outage_hours, result.overlap_count
            ),
        );
    }

    KpiResult {
        availability,
        intended_outage_hours,
        event_count: result.events.len(),
        clean_event_count: result.clean_event_count,
        overlap_count: result.overlap_count,
        reconciled,
        diagnostics,
    }
}

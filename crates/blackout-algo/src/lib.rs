//! # blackout-algo: synthetic grid blackout traces
//!
//! Generates a plausible 0/1 grid availability series from outage statistics
//! and derives reliability KPIs from it.
//!
//! ## Pipeline
//!
//! | Stage | Function |
//! |-------|----------|
//! | Hour-range table → 24 hourly weights | [`build_hourly_weights`] |
//! | Monthly frequency → event count | [`estimate_event_count`] |
//! | Weighted distinct start times | [`sample_event_times`] |
//! | Normal durations on the timestep grid | [`assign_durations`] |
//! | Latest-first painting with overlap counts | [`composite_availability`] |
//! | Reliability and outage hours | [`compute_blackout_kpis`] |
//!
//! [`generate_blackout_events`] runs the first five stages. All randomness
//! comes from the `rng` argument; pass a seeded [`rand::rngs::StdRng`] (see
//! [`seeded_rng`]) for reproducible traces.
//!
//! ## Example
//!
//! ```
//! use blackout_algo::{compute_blackout_kpis, generate_blackout_events, seeded_rng, BlackoutParams};
//!
//! let params = BlackoutParams::new(6.0, 2.0).with_evaluated_days(30);
//! let mut rng = seeded_rng(Some(42));
//! let result = generate_blackout_events(&params, &mut rng).unwrap();
//! let kpis = compute_blackout_kpis(&result);
//!
//! assert_eq!(result.series.len(), 30 * 24);
//! assert!(kpis.reliability() <= 1.0);
//! ```

pub mod compositor;
pub mod duration;
pub mod event_count;
pub mod generator;
pub mod kpi;
pub mod likelihood;
pub mod sampler;

pub use compositor::{composite_availability, Composite};
pub use duration::{assign_durations, DurationDraws, QuantizedDuration};
pub use event_count::{estimate_event_count, DAYS_PER_YEAR};
pub use generator::{
    generate_blackout_events, seeded_rng, BlackoutParams, GenerationResult,
    DEFAULT_STD_DURATION, DEFAULT_STD_FREQUENCY,
};
pub use kpi::{availability_kpis, compute_blackout_kpis, AvailabilityKpis, KpiResult};
pub use likelihood::{
    build_hourly_weights, HourlyLikelihoodTable, HourlyWeightMap, LikelihoodRange,
    MonthlyLikelihood, DEFAULT_DAILY_LIKELIHOOD, HOURS_PER_DAY, MONTHS_PER_YEAR,
};
pub use sampler::{sample_event_times, timestamp_weights};

//! # blackout-core: shared types for blackout trace generation
//!
//! Data structures shared by the generator, the timeseries I/O layer and the
//! command line:
//!
//! - [`TimeIndex`] - equally spaced evaluation window
//! - [`AvailabilitySeries`] - read-only 0/1 grid availability trace
//! - [`BlackoutEvent`] - one drawn outage (start + quantized duration)
//! - [`BlackoutError`] / [`BlackoutResult`] - error taxonomy
//! - [`diagnostics::Diagnostics`] - non-fatal notices
//!
//! ```
//! use blackout_core::{AvailabilitySeries, TimeIndex};
//!
//! let index = TimeIndex::from_evaluated_days(2).unwrap();
//! let series = AvailabilitySeries::all_available(index.len());
//! assert_eq!(series.available_count(), 48);
//! ```

pub mod diagnostics;
pub mod error;
pub mod series;
pub mod time;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{BlackoutError, BlackoutResult};
pub use series::{AvailabilitySeries, BlackoutEvent, OutageRun};
pub use time::{TimeIndex, REFERENCE_DATE, SECONDS_PER_HOUR};

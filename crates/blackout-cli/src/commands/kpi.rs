use std::path::Path;

use anyhow::{Context, Result};
use blackout_algo::availability_kpis;
use blackout_cli::cli::OutputFormat;
use blackout_ts::read_availability;
use tracing::info;

use crate::commands::report::print_availability_kpis;

pub fn handle(input: &Path, format: OutputFormat) -> Result<()> {
    let trace = read_availability(input)?;
    info!(
        "Read {} timestamps at {} s spacing from {}",
        trace.series.len(),
        trace.step_seconds,
        input.display()
    );
    let kpis = availability_kpis(&trace.series, trace.step_hours())
        .with_context(|| format!("computing KPIs for {}", input.display()))?;
    print_availability_kpis(&kpis, format)
}

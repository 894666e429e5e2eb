use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use blackout_algo::{compute_blackout_kpis, generate_blackout_events, seeded_rng, KpiResult};
use blackout_cli::{
    cli::Commands,
    config::{load_config, ScenarioConfig},
};
use blackout_ts::{events_frame, write_availability, write_frame};
use tracing::info;

use crate::commands::report::print_kpis;
use crate::commands::telemetry::record_run_timed;

/// Handle `generate`: draw a trace, export it and report its KPIs.
///
/// Command-line statistics override the scenario file. `--days` and
/// `--periods` each replace whichever time specification the file had.
pub fn handle(command: &Commands) -> Result<()> {
    let Commands::Generate {
        config,
        frequency,
        duration,
        std_frequency,
        std_duration,
        days,
        periods,
        start,
        step_minutes,
        seed,
        out,
        events_out,
        format,
        no_manifest,
    } = command
    else {
        unreachable!();
    };

    let mut scenario = match config {
        Some(path) => load_config(path)?,
        None => ScenarioConfig::default(),
    };
    let gen = &mut scenario.generation;
    if let Some(value) = frequency {
        gen.average_frequency = *value;
    }
    if let Some(value) = duration {
        gen.average_duration = *value;
    }
    if let Some(value) = std_frequency {
        gen.std_frequency = *value;
    }
    if let Some(value) = std_duration {
        gen.std_duration = *value;
    }
    if let Some(value) = days {
        gen.evaluated_days = Some(*value);
        gen.periods = None;
    }
    if let Some(value) = periods {
        gen.periods = Some(*value);
        gen.evaluated_days = None;
    }
    if start.is_some() {
        gen.start = *start;
    }
    if let Some(value) = step_minutes {
        gen.step_minutes = *value;
    }
    if seed.is_some() {
        gen.seed = *seed;
    }

    let started = Instant::now();
    let res = run(&scenario, out, events_out.as_deref());

    if !*no_manifest {
        let gen = &scenario.generation;
        let frequency = gen.average_frequency.to_string();
        let duration = gen.average_duration.to_string();
        let std_frequency = gen.std_frequency.to_string();
        let std_duration = gen.std_duration.to_string();
        let window = match (gen.evaluated_days, gen.periods) {
            (Some(days), _) => format!("{days} days"),
            (None, Some(periods)) => format!("{periods} x {} min", gen.step_minutes),
            (None, None) => String::new(),
        };
        let config_path = config
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let mut outputs = vec![out.as_path()];
        if let Some(path) = events_out {
            outputs.push(path.as_path());
        }
        record_run_timed(
            &outputs,
            "generate",
            &[
                ("config", config_path.as_str()),
                ("frequency", frequency.as_str()),
                ("duration", duration.as_str()),
                ("std_frequency", std_frequency.as_str()),
                ("std_duration", std_duration.as_str()),
                ("window", window.as_str()),
            ],
            scenario.generation.seed,
            started,
            &res,
        );
    }

    print_kpis(&res?, *format)
}

fn run(scenario: &ScenarioConfig, out: &Path, events_out: Option<&Path>) -> Result<KpiResult> {
    let params = scenario.to_params()?;
    let mut rng = seeded_rng(scenario.generation.seed);
    let result = generate_blackout_events(&params, &mut rng).context("generating blackout trace")?;
    info!(
        "Generated {} blackout events over {} timestamps",
        result.event_count(),
        result.time_index.len()
    );

    write_availability(out, &result.time_index, &result.series)?;
    info!("Wrote availability trace to {}", out.display());

    if let Some(path) = events_out {
        let mut df = events_frame(&result.events)?;
        write_frame(&mut df, path)?;
        info!("Wrote {} events to {}", result.events.len(), path.display());
    }

    Ok(compute_blackout_kpis(&result))
}

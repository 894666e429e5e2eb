use blackout_cli::manifest::{record_manifest, ManifestTelemetry, Param, RunRecord};
use std::{env, path::Path, time::Instant};
use tracing::warn;

const TELEMETRY_ENV_KEYS: &[&str] = &[
    "BLACKOUT_ENV",
    "BLACKOUT_RELEASE_VERSION",
    "GITHUB_RUN_ID",
    "GITHUB_WORKFLOW",
    "GITHUB_JOB",
    "GITHUB_REF",
    "GITHUB_SHA",
];

fn collect_telemetry_env() -> Vec<Param> {
    TELEMETRY_ENV_KEYS
        .iter()
        .filter_map(|key| {
            env::var(key).ok().map(|value| Param {
                name: key.to_string(),
                value,
            })
        })
        .collect()
}

fn correlation_id() -> Option<String> {
    env::var("BLACKOUT_CORRELATION_ID")
        .or_else(|_| env::var("GITHUB_RUN_ID"))
        .ok()
}

/// Record a manifest for a finished run. Write failures are logged, not returned.
pub fn record_run_timed<T>(
    outputs: &[&Path],
    command: &str,
    params: &[(&str, &str)],
    seed: Option<u64>,
    start: Instant,
    result: &anyhow::Result<T>,
) {
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = if result.is_ok() { "success" } else { "failure" };
    let telemetry = ManifestTelemetry {
        status: status.to_string(),
        duration_ms: Some(duration_ms),
        env: collect_telemetry_env(),
        correlation_id: correlation_id(),
    };
    let record = RunRecord {
        command,
        params,
        outputs,
        seed,
        telemetry: Some(telemetry),
    };
    if let Err(err) = record_manifest(record) {
        warn!("Failed to record run manifest: {err}");
    }
}

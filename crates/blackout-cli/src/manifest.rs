use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Provenance record written as `run-<id>.json` next to a command's output.
#[derive(Debug, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub run_id: String,
    pub command: String,
    pub version: String,
    pub timestamp: String,
    /// Seed the trace was drawn with, when one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub outputs: Vec<String>,
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<ManifestTelemetry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTelemetry {
    /// `success` or `failure`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Everything a manifest records about one invocation.
pub struct RunRecord<'a> {
    pub command: &'a str,
    pub params: &'a [(&'a str, &'a str)],
    pub outputs: &'a [&'a Path],
    pub seed: Option<u64>,
    pub telemetry: Option<ManifestTelemetry>,
}

/// Write the manifest beside the first output and return its path.
pub fn record_manifest(record: RunRecord<'_>) -> Result<PathBuf> {
    let primary = record
        .outputs
        .first()
        .context("a run manifest needs at least one output")?;
    let run_id = Uuid::new_v4().to_string();
    let dir = primary
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    fs::create_dir_all(&dir)?;
    let manifest = ManifestEntry {
        run_id: run_id.clone(),
        command: record.command.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        seed: record.seed,
        outputs: record
            .outputs
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        params: record
            .params
            .iter()
            .map(|(k, v)| Param {
                name: k.to_string(),
                value: v.to_string(),
            })
            .collect(),
        telemetry: record.telemetry,
    };
    let json = serde_json::to_string_pretty(&manifest)?;
    let path = dir.join(format!("run-{}.json", run_id));
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    info!("Recorded run manifest {}", path.display());
    Ok(path)
}

pub fn read_manifest(path: &Path) -> Result<ManifestEntry> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let manifest = serde_json::from_str(&json)?;
    Ok(manifest)
}

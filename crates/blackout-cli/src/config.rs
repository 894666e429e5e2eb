//! Scenario configuration loaded from TOML.
//!
//! Every key is optional; missing values fall back to the defaults below.
//! A minimal file only needs the statistics that differ from them:
//!
//! ```toml
//! [generation]
//! average_frequency = 6.0
//! average_duration = 2.5
//! evaluated_days = 30
//! seed = 42
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use blackout_algo::{
    BlackoutParams, HourlyLikelihoodTable, LikelihoodRange, MonthlyLikelihood,
    DEFAULT_DAILY_LIKELIHOOD, DEFAULT_STD_DURATION, DEFAULT_STD_FREQUENCY,
};
use blackout_core::{TimeIndex, REFERENCE_DATE};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Window used when neither `evaluated_days` nor `periods` is given
pub const DEFAULT_EVALUATED_DAYS: u32 = 365;

/// Complete scenario description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub likelihood: LikelihoodConfig,
}

/// Blackout statistics and evaluation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Mean blackouts per month
    #[serde(default = "default_average_frequency")]
    pub average_frequency: f64,
    /// Mean blackout length in hours
    #[serde(default = "default_average_duration")]
    pub average_duration: f64,
    #[serde(default = "default_std_frequency")]
    pub std_frequency: f64,
    #[serde(default = "default_std_duration")]
    pub std_duration: f64,
    /// Hourly days from 2024-01-01; mutually exclusive with `periods`.
    /// With neither set, [`DEFAULT_EVALUATED_DAYS`] applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_days: Option<u32>,
    /// Number of timestamps of an explicit index starting at `start`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    /// Random seed; omit for a fresh trace on every run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            average_frequency: default_average_frequency(),
            average_duration: default_average_duration(),
            std_frequency: default_std_frequency(),
            std_duration: default_std_duration(),
            evaluated_days: Some(DEFAULT_EVALUATED_DAYS),
            periods: None,
            start: None,
            step_minutes: default_step_minutes(),
            seed: None,
        }
    }
}

fn default_average_frequency() -> f64 {
    4.0
}

fn default_average_duration() -> f64 {
    3.0
}

fn default_std_frequency() -> f64 {
    DEFAULT_STD_FREQUENCY
}

fn default_std_duration() -> f64 {
    DEFAULT_STD_DURATION
}

fn default_step_minutes() -> u32 {
    60
}

/// When blackouts tend to start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodConfig {
    /// Twelve weights, January first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<[f64; 12]>,
    #[serde(default = "default_daily")]
    pub daily: Vec<LikelihoodRange>,
}

impl Default for LikelihoodConfig {
    fn default() -> Self {
        Self {
            monthly: None,
            daily: default_daily(),
        }
    }
}

fn default_daily() -> Vec<LikelihoodRange> {
    DEFAULT_DAILY_LIKELIHOOD.to_vec()
}

impl ScenarioConfig {
    /// Translate the file into generator parameters.
    ///
    /// A file without any time specification evaluates
    /// [`DEFAULT_EVALUATED_DAYS`] days. Setting both `evaluated_days` and
    /// `periods` is passed through and surfaces the generator's own error.
    pub fn to_params(&self) -> Result<BlackoutParams> {
        let gen = &self.generation;
        let mut params = BlackoutParams::new(gen.average_frequency, gen.average_duration)
            .with_std_frequency(gen.std_frequency)
            .with_std_duration(gen.std_duration)
            .with_daily_likelihood(HourlyLikelihoodTable::new(self.likelihood.daily.clone()));

        if let Some(weights) = self.likelihood.monthly {
            params = params.with_monthly_likelihood(MonthlyLikelihood::new(weights)?);
        }
        match (gen.evaluated_days, gen.periods) {
            (Some(days), _) => params = params.with_evaluated_days(days),
            (None, None) => params = params.with_evaluated_days(DEFAULT_EVALUATED_DAYS),
            (None, Some(_)) => {}
        }
        if let Some(periods) = gen.periods {
            let start = match gen.start {
                Some(start) => start,
                None => reference_start()?,
            };
            let index = TimeIndex::new(start, i64::from(gen.step_minutes) * 60, periods)?;
            params = params.with_time_index(index);
        }
        Ok(params)
    }
}

fn reference_start() -> Result<NaiveDateTime> {
    let (year, month, day) = REFERENCE_DATE;
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .context("reference date is not a calendar date")
}

pub fn load_config(path: &Path) -> Result<ScenarioConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ScenarioConfig =
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &ScenarioConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

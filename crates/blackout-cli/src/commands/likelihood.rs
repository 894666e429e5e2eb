use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use blackout_algo::{build_hourly_weights, HourlyLikelihoodTable, MonthlyLikelihood};
use blackout_cli::{cli::OutputFormat, config::load_config, ScenarioConfig};
use serde_json::json;
use tabwriter::TabWriter;

use crate::commands::report::print_json;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn handle(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let scenario = match config {
        Some(path) => load_config(path)?,
        None => ScenarioConfig::default(),
    };
    let hourly = build_hourly_weights(&HourlyLikelihoodTable::new(
        scenario.likelihood.daily.clone(),
    ))?;
    let monthly = match scenario.likelihood.monthly {
        Some(weights) => MonthlyLikelihood::new(weights)?,
        None => MonthlyLikelihood::uniform(),
    };

    match format {
        OutputFormat::Json => print_json(&json!({
            "hourly": hourly.as_array(),
            "monthly": monthly.as_array(),
        })),
        OutputFormat::Plain => {
            let hourly_total: f64 = hourly.as_array().iter().sum();
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "HOUR\tWEIGHT\tSHARE")?;
            for (hour, weight) in hourly.iter() {
                writeln!(
                    writer,
                    "{hour:02}\t{weight}\t{:.1}%",
                    share(weight, hourly_total)
                )?;
            }
            writeln!(writer)?;
            let monthly_total: f64 = monthly.as_array().iter().sum();
            writeln!(writer, "MONTH\tWEIGHT\tSHARE")?;
            for (name, &weight) in MONTH_NAMES.iter().zip(monthly.as_array()) {
                writeln!(
                    writer,
                    "{name}\t{weight}\t{:.1}%",
                    share(weight, monthly_total)
                )?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn share(weight: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * weight / total
    } else {
        0.0
    }
}

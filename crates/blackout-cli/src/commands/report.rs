use std::io::{self, Write};

use anyhow::{Context, Result};
use blackout_algo::{AvailabilityKpis, KpiResult};
use blackout_cli::cli::OutputFormat;
use serde::Serialize;
use tabwriter::TabWriter;

pub fn print_kpis(kpis: &KpiResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(kpis),
        OutputFormat::Plain => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "METRIC\tVALUE")?;
            write_availability_rows(&mut writer, &kpis.availability)?;
            writeln!(writer, "intended outage hours\t{:.2}", kpis.intended_outage_hours)?;
            writeln!(writer, "events\t{}", kpis.event_count)?;
            writeln!(writer, "clean events\t{}", kpis.clean_event_count)?;
            writeln!(writer, "overlapping events\t{}", kpis.overlap_count)?;
            writeln!(writer, "reconciled\t{}", kpis.reconciled)?;
            writer.flush()?;
            if kpis.diagnostics.has_issues() {
                print!("{}", kpis.diagnostics);
            }
            Ok(())
        }
    }
}

pub fn print_availability_kpis(kpis: &AvailabilityKpis, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(kpis),
        OutputFormat::Plain => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "METRIC\tVALUE")?;
            write_availability_rows(&mut writer, kpis)?;
            writer.flush()?;
            Ok(())
        }
    }
}

fn write_availability_rows<W: Write>(writer: &mut W, kpis: &AvailabilityKpis) -> Result<()> {
    writeln!(writer, "reliability\t{:.6}", kpis.reliability)?;
    writeln!(writer, "total hours\t{:.2}", kpis.total_hours)?;
    writeln!(writer, "outage hours\t{:.2}", kpis.total_outage_hours)?;
    writeln!(writer, "blackout intervals\t{}", kpis.blackout_intervals)?;
    writeln!(writer, "longest blackout hours\t{:.2}", kpis.longest_blackout_hours)?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout(), value).context("serializing report to JSON")?;
    println!();
    Ok(())
}

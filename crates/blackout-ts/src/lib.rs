//! Tabular export and import of availability traces.
//!
//! Traces are exchanged as flat tables so that downstream models can align
//! them with their own time grid:
//!
//! | column | type | meaning |
//! |--------|------|---------|
//! | `timestamp` | Int64 | Unix seconds (UTC-naive) |
//! | `datetime` | Utf8 | `%Y-%m-%d %H:%M:%S` |
//! | `availability` | Int64 | 1 = grid up, 0 = blackout |
//!
//! The file format follows the extension: `.csv`, or `.parquet` when the
//! `parquet` feature is enabled.

use std::{
    fs::{self, File},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use blackout_core::{AvailabilitySeries, BlackoutEvent, TimeIndex, SECONDS_PER_HOUR};
use polars::prelude::*;
#[cfg(feature = "parquet")]
use polars::prelude::{ParquetReader, ParquetWriter};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const DATETIME_COLUMN: &str = "datetime";
pub const AVAILABILITY_COLUMN: &str = "availability";

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An availability trace read back from a table.
#[derive(Debug, Clone)]
pub struct AvailabilityTrace {
    pub timestamps: Vec<i64>,
    pub series: AvailabilitySeries,
    /// Spacing between consecutive timestamps
    pub step_seconds: i64,
}

impl AvailabilityTrace {
    pub fn step_hours(&self) -> f64 {
        self.step_seconds as f64 / SECONDS_PER_HOUR as f64
    }
}

/// One row per timestamp of `index`.
pub fn availability_frame(index: &TimeIndex, series: &AvailabilitySeries) -> Result<DataFrame> {
    if index.len() != series.len() {
        bail!(
            "time index has {} timestamps but the series has {} values",
            index.len(),
            series.len()
        );
    }
    let timestamps: Vec<i64> = index.iter().map(|ts| ts.and_utc().timestamp()).collect();
    let datetimes: Vec<String> = index
        .iter()
        .map(|ts| ts.format(DATETIME_FORMAT).to_string())
        .collect();
    let availability: Vec<i64> = series.values().iter().map(|&v| i64::from(v)).collect();

    DataFrame::new(vec![
        Series::new(TIMESTAMP_COLUMN, timestamps),
        Series::new(DATETIME_COLUMN, datetimes),
        Series::new(AVAILABILITY_COLUMN, availability),
    ])
    .context("building availability frame")
}

/// One row per blackout event.
pub fn events_frame(events: &[BlackoutEvent]) -> Result<DataFrame> {
    let starts: Vec<String> = events
        .iter()
        .map(|e| e.start.format(DATETIME_FORMAT).to_string())
        .collect();
    let positions: Vec<i64> = events.iter().map(|e| e.start_index as i64).collect();
    let hours: Vec<f64> = events.iter().map(|e| e.duration_hours).collect();

    DataFrame::new(vec![
        Series::new("start", starts),
        Series::new("start_index", positions),
        Series::new("duration_hours", hours),
    ])
    .context("building events frame")
}

/// Write `df` to `path`, choosing CSV or Parquet from the extension.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match extension(path).as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .context("writing Parquet file"),
        #[cfg(not(feature = "parquet"))]
        "parquet" => Err(anyhow!(
            "parquet support is disabled; rebuild with the 'parquet' feature"
        )),
        "csv" => CsvWriter::new(&mut file)
            .finish(df)
            .context("writing CSV file"),
        _ => Err(anyhow!(
            "unsupported output extension for {}; use .csv or .parquet",
            path.display()
        )),
    }
}

/// Export a trace to `path`.
pub fn write_availability(path: &Path, index: &TimeIndex, series: &AvailabilitySeries) -> Result<()> {
    let mut df = availability_frame(index, series)?;
    write_frame(&mut df, path)
}

pub fn read_frame(path: &Path) -> Result<DataFrame> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    match extension(path).as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => {
            let reader = ParquetReader::new(&mut file);
            reader.finish().context("reading Parquet file")
        }
        #[cfg(not(feature = "parquet"))]
        "parquet" => Err(anyhow!(
            "parquet support is disabled; rebuild with the 'parquet' feature"
        )),
        "csv" => {
            let reader = CsvReader::new(&mut file);
            reader.has_header(true).finish().context("reading CSV file")
        }
        other => Err(anyhow!(
            "unsupported file extension '{}'; use .csv or .parquet",
            other
        )),
    }
}

/// Read a trace written by [`write_availability`] (or any table with the
/// same `timestamp` and `availability` columns).
///
/// The timestep is taken from the first two timestamps; a single-row trace
/// is assumed hourly. Irregular spacing is rejected.
pub fn read_availability(path: &Path) -> Result<AvailabilityTrace> {
    let df = read_frame(path)?;
    let timestamps = int_column(&df, TIMESTAMP_COLUMN)?;
    let values = int_column(&df, AVAILABILITY_COLUMN)?;

    let values = values
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            0 | 1 => Ok(v as u8),
            other => Err(anyhow!("row {}: availability {} is not 0 or 1", row, other)),
        })
        .collect::<Result<Vec<u8>>>()?;
    let series = AvailabilitySeries::from_values(values)?;

    let step_seconds = match timestamps.as_slice() {
        [first, second, ..] => second
            .checked_sub(*first)
            .ok_or_else(|| anyhow!("timestamps {first} and {second} are too far apart"))?,
        _ => SECONDS_PER_HOUR,
    };
    if step_seconds <= 0 {
        bail!("timestamps must be strictly increasing");
    }
    if let Some(pos) = timestamps
        .windows(2)
        .position(|w| w[1].checked_sub(w[0]) != Some(step_seconds))
    {
        bail!(
            "irregular timestep at row {}: expected {} s spacing",
            pos + 1,
            step_seconds
        );
    }

    Ok(AvailabilityTrace {
        timestamps,
        series,
        step_seconds,
    })
}

fn int_column(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let column = df
        .column(name)
        .with_context(|| format!("missing column '{name}'"))?
        .cast(&DataType::Int64)
        .with_context(|| format!("casting column '{name}' to Int64"))?;
    column
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("row {}: '{}' is null", row, name)))
        .collect()
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn trace() -> (TimeIndex, AvailabilitySeries) {
        let index = TimeIndex::from_evaluated_days(1).unwrap();
        let mut values = vec![1u8; 24];
        values[5..8].fill(0);
        (index, AvailabilitySeries::from_values(values).unwrap())
    }

    #[test]
    fn frame_has_one_row_per_timestamp() {
        let (index, series) = trace();
        let df = availability_frame(&index, &series).unwrap();
        assert_eq!(df.height(), 24);
        let datetimes = df.column(DATETIME_COLUMN).unwrap();
        assert_eq!(
            datetimes.get(1).unwrap().to_string().trim_matches('"'),
            "2024-01-01 01:00:00"
        );
    }

    #[test]
    fn frame_rejects_length_mismatch() {
        let (index, _) = trace();
        let short = AvailabilitySeries::all_available(3);
        assert!(availability_frame(&index, &short).is_err());
    }

    #[test]
    fn csv_trace_reads_back() {
        let (index, series) = trace();
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/availability.csv");
        write_availability(&path, &index, &series).unwrap();

        let read = read_availability(&path).unwrap();
        assert_eq!(read.series, series);
        assert_eq!(read.step_seconds, 3600);
        assert_eq!(read.timestamps[0], index.start().and_utc().timestamp());
    }

    #[cfg(feature = "parquet")]
    #[test]
    fn parquet_trace_reads_back() {
        let (index, series) = trace();
        let dir = tempdir().unwrap();
        let path = dir.path().join("availability.parquet");
        write_availability(&path, &index, &series).unwrap();
        let read = read_availability(&path).unwrap();
        assert_eq!(read.series.outage_count(), 3);
    }

    #[test]
    fn rejects_non_binary_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "timestamp,availability\n0,1\n3600,2\n").unwrap();
        let err = read_availability(&path).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn rejects_irregular_spacing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("irregular.csv");
        fs::write(&path, "timestamp,availability\n0,1\n3600,0\n9000,1\n").unwrap();
        assert!(read_availability(&path).is_err());
    }

    #[test]
    fn rejects_timestamps_spanning_the_whole_i64_range() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extreme.csv");
        fs::write(
            &path,
            format!("timestamp,availability\n{},1\n{},1\n", i64::MIN, i64::MAX),
        )
        .unwrap();
        let err = read_availability(&path).unwrap_err();
        assert!(err.to_string().contains("too far apart"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let (index, series) = trace();
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        assert!(write_availability(&path, &index, &series).is_err());
    }

    #[test]
    fn events_table_columns() {
        let index = TimeIndex::from_evaluated_days(1).unwrap();
        let events = vec![BlackoutEvent {
            start: index.timestamp(3).unwrap(),
            start_index: 3,
            duration_hours: 2.0,
            duration_steps: 2,
        }];
        let df = events_frame(&events).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.get_column_names(), vec!["start", "start_index", "duration_hours"]);
    }
}

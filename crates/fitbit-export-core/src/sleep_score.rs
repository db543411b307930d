use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use tracing::info;

use crate::error::{ExportError, Result};

pub const SLEEP_SCORE_FILE: &str = "sleep_score.csv";

static TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Loads the sleep score CSV. The `timestamp` column is parsed into a
/// timezone-naive Datetime; every other column keeps its name and gets
/// whole-column Int64, Float64, or Utf8 typing, in that order of preference.
pub fn load_sleep_score(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ExportError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let timestamp_idx = headers
        .iter()
        .position(|name| name == "timestamp")
        .ok_or(ExportError::MissingColumn {
            column: "timestamp",
        })?;

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (idx, value) in record.iter().enumerate() {
            raw_columns[idx].push(value.to_string());
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        if idx == timestamp_idx {
            columns.push(timestamp_column(name, &raw_columns[idx])?);
        } else {
            columns.push(inferred_column(name, &raw_columns[idx]));
        }
    }

    let frame = DataFrame::new(columns)?;
    info!(rows = frame.height(), "loaded sleep score table");
    Ok(frame)
}

fn timestamp_column(name: &str, values: &[String]) -> Result<Column> {
    let mut micros = Vec::with_capacity(values.len());
    for value in values {
        micros.push(parse_naive_timestamp(value)?.and_utc().timestamp_micros());
    }
    let series = Series::new(name.into(), micros)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    Ok(series.into())
}

/// Accepts both timezone-bearing (RFC 3339) and naive timestamps, keeping the
/// local wall-clock component and dropping any offset.
fn parse_naive_timestamp(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.naive_local());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }
    Err(ExportError::Timestamp {
        value: trimmed.to_string(),
    })
}

fn inferred_column(name: &str, values: &[String]) -> Column {
    let as_i64: Option<Vec<Option<i64>>> = values
        .iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Some(None)
            } else {
                trimmed.parse::<i64>().ok().map(Some)
            }
        })
        .collect();
    if let Some(parsed) = as_i64 {
        return Series::new(name.into(), parsed).into();
    }

    let as_f64: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Some(None)
            } else {
                trimmed.parse::<f64>().ok().map(Some)
            }
        })
        .collect();
    if let Some(parsed) = as_f64 {
        return Series::new(name.into(), parsed).into();
    }

    let utf8: Vec<&str> = values.iter().map(String::as_str).collect();
    Series::new(name.into(), utf8).into()
}

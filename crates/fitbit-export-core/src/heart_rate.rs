use std::path::Path;

use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::info;

use fitbit_export_parser::{decode_record, HeartRateEntry};

use crate::error::{ExportError, Result};
use crate::sources::{matching_files, read_document};

pub const HEART_RATE_FILE_PATTERN: &str = "heart_rate-*.json";
pub const HEART_RATE_COLUMNS: [&str; 3] = ["dateTime", "bpm", "confidence"];

const DATE_TIME_FORMAT: &str = "%m/%d/%y %H:%M:%S";

/// Concatenates every per-period heart-rate file under `dir` into one table,
/// in file order then in-file order. `dateTime` is a timezone-naive Datetime;
/// `bpm` and `confidence` are Int32.
pub fn load_heart_rate_data(dir: &Path) -> Result<DataFrame> {
    let paths = matching_files(dir, HEART_RATE_FILE_PATTERN)?;
    info!(files = paths.len(), "parsing heart rate files");

    let mut timestamps: Vec<i64> = Vec::new();
    let mut bpm: Vec<i32> = Vec::new();
    let mut confidence: Vec<i32> = Vec::new();

    for path in &paths {
        for record in read_document(path)? {
            let entry: HeartRateEntry = decode_record(record)?;
            let parsed = NaiveDateTime::parse_from_str(&entry.date_time, DATE_TIME_FORMAT)
                .map_err(|_| ExportError::Timestamp {
                    value: entry.date_time.clone(),
                })?;
            timestamps.push(parsed.and_utc().timestamp_micros());
            bpm.push(entry.value.bpm);
            confidence.push(entry.value.confidence);
        }
    }

    let date_time = Series::new("dateTime".into(), timestamps)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;
    let columns: Vec<Column> = vec![
        date_time.into(),
        Series::new("bpm".into(), bpm).into(),
        Series::new("confidence".into(), confidence).into(),
    ];

    DataFrame::new(columns).map_err(ExportError::from)
}

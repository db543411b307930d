use chrono::Datelike;
use polars::prelude::*;

use crate::errors::ParseError;
use crate::model::{SleepSummary, StageEvent, StageSummary};

pub const SUMMARY_COLUMNS: [&str; 17] = [
    "dateOfSleep",
    "minutesAsleep",
    "minutesAwake",
    "timeInBed",
    "efficiency",
    "deepCount",
    "deepMinutes",
    "deepThirtyDayAvgMinutes",
    "lightCount",
    "lightMinutes",
    "lightThirtyDayAvgMinutes",
    "remCount",
    "remMinutes",
    "remThirtyDayAvgMinutes",
    "wakeCount",
    "wakeMinutes",
    "wakeThirtyDayAvgMinutes",
];

pub const STAGE_EVENT_COLUMNS: [&str; 3] = ["dateTime", "level", "seconds"];

const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn int32_column(name: &str, values: Vec<i32>) -> Column {
    Series::new(name.into(), values).into()
}

/// Builds the 17-column summary table from deduplicated rows. `dateOfSleep`
/// is a Date column; every other column is Int32.
pub fn build_summary_frame(rows: &[SleepSummary]) -> Result<DataFrame, ParseError> {
    let days: Vec<i32> = rows
        .iter()
        .map(|row| row.date_of_sleep.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();
    let dates = Series::new("dateOfSleep".into(), days).cast(&DataType::Date)?;

    let stages: [(&str, fn(&SleepSummary) -> &StageSummary); 4] = [
        ("deep", |row| &row.deep),
        ("light", |row| &row.light),
        ("rem", |row| &row.rem),
        ("wake", |row| &row.wake),
    ];

    let mut columns: Vec<Column> = Vec::with_capacity(SUMMARY_COLUMNS.len());
    columns.push(dates.into());
    columns.push(int32_column(
        "minutesAsleep",
        rows.iter().map(|row| row.minutes_asleep).collect(),
    ));
    columns.push(int32_column(
        "minutesAwake",
        rows.iter().map(|row| row.minutes_awake).collect(),
    ));
    columns.push(int32_column(
        "timeInBed",
        rows.iter().map(|row| row.time_in_bed).collect(),
    ));
    columns.push(int32_column(
        "efficiency",
        rows.iter().map(|row| row.efficiency).collect(),
    ));

    for (name, stage) in stages {
        columns.push(int32_column(
            &format!("{name}Count"),
            rows.iter().map(|row| stage(row).count).collect(),
        ));
        columns.push(int32_column(
            &format!("{name}Minutes"),
            rows.iter().map(|row| stage(row).minutes).collect(),
        ));
        columns.push(int32_column(
            &format!("{name}ThirtyDayAvgMinutes"),
            rows.iter()
                .map(|row| stage(row).thirty_day_avg_minutes)
                .collect(),
        ));
    }

    DataFrame::new(columns).map_err(ParseError::from)
}

/// Builds the per-session stage-event sub-table, preserving source order.
pub fn build_stage_event_frame(events: &[StageEvent]) -> Result<DataFrame, ParseError> {
    let mut date_times = Vec::with_capacity(events.len());
    let mut levels = Vec::with_capacity(events.len());
    let mut seconds = Vec::with_capacity(events.len());

    for event in events {
        date_times.push(event.date_time.as_str());
        levels.push(event.level.as_str());
        seconds.push(event.seconds);
    }

    let columns: Vec<Column> = vec![
        Series::new("dateTime".into(), date_times).into(),
        Series::new("level".into(), levels).into(),
        Series::new("seconds".into(), seconds).into(),
    ];

    DataFrame::new(columns).map_err(ParseError::from)
}

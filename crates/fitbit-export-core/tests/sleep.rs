use std::fs;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataType;

use fitbit_export_core::{load_sleep_data, ExportError};
use fitbit_export_parser::{ParseError, SUMMARY_COLUMNS};

fn sleep_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sleep")
}

fn date(value: &str) -> NaiveDate {
    value.parse().expect("invalid test date")
}

fn epoch_days(value: &str) -> i32 {
    date(value).num_days_from_ce() - 719_163
}

fn date_column(frame: &polars::prelude::DataFrame) -> Vec<i32> {
    frame
        .column("dateOfSleep")
        .expect("dateOfSleep column missing")
        .cast(&DataType::Int32)
        .expect("dateOfSleep cast failed")
        .i32()
        .expect("dateOfSleep column not integer")
        .into_no_null_iter()
        .collect()
}

#[test]
fn aggregates_overlapping_files_into_one_summary_table() {
    let data = load_sleep_data(&sleep_dir()).expect("sleep aggregation failed");

    assert_eq!(data.summary.get_column_names(), SUMMARY_COLUMNS);
    assert_eq!(
        data.summary.column("dateOfSleep").unwrap().dtype(),
        &DataType::Date
    );
    for &name in &SUMMARY_COLUMNS[1..] {
        assert_eq!(
            data.summary.column(name).unwrap().dtype(),
            &DataType::Int32,
            "column {name} is not Int32"
        );
    }

    // The classic record contributes nothing and the duplicated date
    // collapses to a single row.
    assert_eq!(data.summary.height(), 3);
    assert_eq!(
        date_column(&data.summary),
        vec![
            epoch_days("2021-04-29"),
            epoch_days("2021-05-01"),
            epoch_days("2021-05-02"),
        ]
    );
}

#[test]
fn duplicate_date_keeps_row_with_largest_deep_average() {
    let data = load_sleep_data(&sleep_dir()).expect("sleep aggregation failed");

    let deep_avgs: Vec<i32> = data
        .summary
        .column("deepThirtyDayAvgMinutes")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let minutes_asleep: Vec<i32> = data
        .summary
        .column("minutesAsleep")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();

    // 2021-05-01 appears in both files with averages 15 and 10; the row with
    // the larger average (from the April file) survives.
    assert_eq!(deep_avgs[1], 15);
    assert_eq!(minutes_asleep[1], 400);
}

#[test]
fn stage_events_are_keyed_by_date() {
    let data = load_sleep_data(&sleep_dir()).expect("sleep aggregation failed");

    assert_eq!(data.stage_events.len(), 3);
    for key in ["2021-04-29", "2021-05-01", "2021-05-02"] {
        assert!(
            data.stage_events.contains_key(&date(key)),
            "missing stage events for {key}"
        );
    }
    assert!(!data.stage_events.contains_key(&date("2021-04-26")));
}

#[test]
fn stage_events_keep_last_file_while_summary_keeps_largest_average() {
    let data = load_sleep_data(&sleep_dir()).expect("sleep aggregation failed");

    // The summary row for 2021-05-01 comes from the April file (average 15),
    // but its stage-event sub-table is the May file's four-row version: the
    // mapping is resolved by plain overwrite in file-processing order.
    let events = data
        .stage_events
        .get(&date("2021-05-01"))
        .expect("missing stage events for duplicated date");
    assert_eq!(events.height(), 4);

    let deep_avgs: Vec<i32> = data
        .summary
        .column("deepThirtyDayAvgMinutes")
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(deep_avgs[1], 15);
}

#[test]
fn fails_when_no_sleep_files_match() {
    let dir = tempfile::tempdir().expect("tempdir failed");

    match load_sleep_data(dir.path()) {
        Err(ExportError::NoMatchingFiles { pattern, .. }) => {
            assert_eq!(pattern, "sleep-*.json");
        }
        other => panic!("expected NoMatchingFiles error, got {other:?}"),
    }
}

#[test]
fn fails_when_a_file_decodes_to_zero_records() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    fs::write(dir.path().join("sleep-2020-12.json"), "[]").expect("fixture write failed");

    match load_sleep_data(dir.path()) {
        Err(ExportError::EmptyDocument { .. }) => {}
        other => panic!("expected EmptyDocument error, got {other:?}"),
    }
}

#[test]
fn malformed_record_aborts_the_whole_aggregation() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    fs::write(
        dir.path().join("sleep-2021-06.json"),
        r#"[{
            "dateOfSleep": "2021-06-01",
            "minutesAsleep": 410,
            "minutesAwake": 50,
            "timeInBed": 460,
            "type": "stages",
            "levels": {
                "summary": {
                    "deep": {"count": 4, "minutes": 70, "thirtyDayAvgMinutes": 66},
                    "light": {"count": 24, "minutes": 240, "thirtyDayAvgMinutes": 230},
                    "rem": {"count": 8, "minutes": 95, "thirtyDayAvgMinutes": 87},
                    "wake": {"count": 26, "minutes": 50, "thirtyDayAvgMinutes": 54}
                },
                "data": []
            }
        }]"#,
    )
    .expect("fixture write failed");

    match load_sleep_data(dir.path()) {
        Err(ExportError::Parse(ParseError::MalformedRecord { message })) => {
            assert!(
                message.contains("efficiency"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected MalformedRecord error, got {other:?}"),
    }
}

#[test]
fn output_dates_are_a_subset_of_non_classic_source_dates() {
    let data = load_sleep_data(&sleep_dir()).expect("sleep aggregation failed");

    let source_dates = [
        epoch_days("2021-04-29"),
        epoch_days("2021-05-01"),
        epoch_days("2021-05-02"),
    ];
    for day in date_column(&data.summary) {
        assert!(source_dates.contains(&day), "invented date {day}");
    }
}

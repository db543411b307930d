use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use fitbit_export_parser::{build_summary_frame, parse_session, SleepSummary};

use crate::error::Result;
use crate::sources::{matching_files, read_document};

pub const SLEEP_FILE_PATTERN: &str = "sleep-*.json";

/// The consolidated sleep tables for one export directory.
///
/// `stage_events` resolves duplicate dates independently of `summary`: the
/// sub-table from the last-processed file wins, while the summary keeps the
/// row with the largest `deepThirtyDayAvgMinutes`. The two rules can retain
/// data from different source files for the same date.
#[derive(Debug, Clone)]
pub struct SleepData {
    pub summary: DataFrame,
    pub stage_events: HashMap<NaiveDate, DataFrame>,
}

/// Parses every sleep session file under `dir` into one deduplicated summary
/// table and a per-date mapping of stage-event sub-tables.
pub fn load_sleep_data(dir: &Path) -> Result<SleepData> {
    let paths = matching_files(dir, SLEEP_FILE_PATTERN)?;
    info!(files = paths.len(), "parsing sleep session files");

    let mut candidates: Vec<SleepSummary> = Vec::new();
    let mut stage_events: HashMap<NaiveDate, DataFrame> = HashMap::new();

    for path in &paths {
        for record in read_document(path)? {
            let Some(parsed) = parse_session(record)? else {
                debug!(path = %path.display(), "skipping classic session record");
                continue;
            };
            // Plain key overwrite: overlapping export windows report the same
            // date and the later file replaces the earlier sub-table.
            stage_events.insert(parsed.summary.date_of_sleep, parsed.stage_events);
            candidates.push(parsed.summary);
        }
    }

    let total = candidates.len();
    let deduplicated = deduplicate_summaries(candidates);
    info!(
        candidates = total,
        rows = deduplicated.len(),
        "deduplicated sleep summaries"
    );

    let summary = build_summary_frame(&deduplicated)?;
    Ok(SleepData {
        summary,
        stage_events,
    })
}

/// Keeps one row per date: candidates are ordered by
/// `(dateOfSleep, deepThirtyDayAvgMinutes)` ascending and the last row per
/// date wins, so the export with the longer 30-day window is retained.
fn deduplicate_summaries(mut candidates: Vec<SleepSummary>) -> Vec<SleepSummary> {
    candidates.sort_by_key(|row| (row.date_of_sleep, row.deep.thirty_day_avg_minutes));

    let mut by_date: BTreeMap<NaiveDate, SleepSummary> = BTreeMap::new();
    for candidate in candidates {
        by_date.insert(candidate.date_of_sleep, candidate);
    }
    by_date.into_values().collect()
}

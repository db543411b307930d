use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ParseError;

/// One sleep session record as exported, discriminated by its `type` field.
///
/// Only `stages` sessions carry per-stage summary data; `classic` is a legacy
/// low-fidelity format that contributes nothing to the output tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SleepSession {
    Classic(LegacySession),
    Stages(ScoredSession),
}

/// Legacy session format. Carries no stage-level data, so nothing is decoded
/// beyond the discriminator.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySession {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSession {
    pub date_of_sleep: NaiveDate,
    pub minutes_asleep: i32,
    pub minutes_awake: i32,
    pub time_in_bed: i32,
    pub efficiency: i32,
    pub levels: SessionLevels,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionLevels {
    pub summary: LevelsSummary,
    pub data: Vec<StageEvent>,
}

/// The four fixed stage groups every scored session must report.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelsSummary {
    pub deep: StageSummary,
    pub light: StageSummary,
    pub rem: StageSummary,
    pub wake: StageSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub count: i32,
    pub minutes: i32,
    /// Trailing 30-day rolling average supplied by the source, consumed as-is.
    pub thirty_day_avg_minutes: i32,
}

/// One contiguous sleep-stage interval within a session. The stage vocabulary
/// comes from the upstream source and is not validated here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEvent {
    pub date_time: String,
    pub level: String,
    pub seconds: i32,
}

/// One heart-rate sample as exported.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateEntry {
    pub date_time: String,
    pub value: HeartRateValue,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HeartRateValue {
    pub bpm: i32,
    pub confidence: i32,
}

/// Flattened per-session summary row: the natural key plus 16 integer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepSummary {
    pub date_of_sleep: NaiveDate,
    pub minutes_asleep: i32,
    pub minutes_awake: i32,
    pub time_in_bed: i32,
    pub efficiency: i32,
    pub deep: StageSummary,
    pub light: StageSummary,
    pub rem: StageSummary,
    pub wake: StageSummary,
}

impl SleepSummary {
    pub fn from_session(session: &ScoredSession) -> Self {
        let summary = &session.levels.summary;
        Self {
            date_of_sleep: session.date_of_sleep,
            minutes_asleep: session.minutes_asleep,
            minutes_awake: session.minutes_awake,
            time_in_bed: session.time_in_bed,
            efficiency: session.efficiency,
            deep: summary.deep,
            light: summary.light,
            rem: summary.rem,
            wake: summary.wake,
        }
    }
}

/// Decodes one JSON record into its typed shape, surfacing the first missing
/// or ill-typed field as a malformed-record error.
pub fn decode_record<T: DeserializeOwned>(record: Value) -> Result<T, ParseError> {
    serde_json::from_value(record).map_err(|err| ParseError::MalformedRecord {
        message: err.to_string(),
    })
}

use polars::prelude::DataFrame;
use serde_json::Value;

use crate::errors::ParseError;
use crate::frame::build_stage_event_frame;
use crate::model::{decode_record, SleepSession, SleepSummary};

/// The output of parsing one scored sleep session: the flattened summary row
/// and the variable-length stage-event sub-table that belongs to it.
#[derive(Debug, Clone)]
pub struct ParsedSession {
    pub summary: SleepSummary,
    pub stage_events: DataFrame,
}

/// Parses one decoded session record.
///
/// Returns `Ok(None)` for classic-type sessions, which are intentionally
/// excluded from both output tables. A record missing any required field
/// fails with [`ParseError::MalformedRecord`] instead of being skipped.
pub fn parse_session(record: Value) -> Result<Option<ParsedSession>, ParseError> {
    let scored = match decode_record::<SleepSession>(record)? {
        SleepSession::Classic(_) => return Ok(None),
        SleepSession::Stages(scored) => scored,
    };

    let summary = SleepSummary::from_session(&scored);
    let stage_events = build_stage_event_frame(&scored.levels.data)?;

    Ok(Some(ParsedSession {
        summary,
        stage_events,
    }))
}

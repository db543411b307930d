pub mod errors;
pub mod frame;
pub mod model;
mod session;

pub use errors::ParseError;
pub use frame::{build_summary_frame, STAGE_EVENT_COLUMNS, SUMMARY_COLUMNS};
pub use model::{
    decode_record, HeartRateEntry, HeartRateValue, LegacySession, LevelsSummary, ScoredSession,
    SessionLevels, SleepSession, SleepSummary, StageEvent, StageSummary,
};
pub use session::{parse_session, ParsedSession};

pub mod error;
pub mod extract;
pub mod heart_rate;
pub mod sleep;
pub mod sleep_score;
mod sources;

pub use error::{ExportError, Result};
pub use extract::extract_export_archive;
pub use heart_rate::{load_heart_rate_data, HEART_RATE_COLUMNS, HEART_RATE_FILE_PATTERN};
pub use sleep::{load_sleep_data, SleepData, SLEEP_FILE_PATTERN};
pub use sleep_score::{load_sleep_score, SLEEP_SCORE_FILE};

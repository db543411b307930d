use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// A session or sample record is missing a required field or carries a
    /// value of the wrong shape. Distinct from the classic-type skip, which
    /// is not an error.
    #[error("malformed record: {message}")]
    MalformedRecord { message: String },

    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

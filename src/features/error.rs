use crate::time::error::TimeError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Malformed GPS coordinate: {0}")]
    MalformedCoordinate(String),
}

/// Reasons a single file's metadata block could not be turned into a record.
#[derive(Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("Missing metadata tag {0:#06x}")]
    MissingTag(u16),

    #[error("Metadata tag {0:#06x} has an unexpected payload type")]
    UnexpectedPayload(u16),
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Point of interest lookup unavailable: {0}")]
    LookupUnavailable(String),

    #[error("Point of interest lookup returned no usable result")]
    LookupEmpty,
}

// The request URL carries the API key, so it never goes into the message.
impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::LookupUnavailable(err.without_url().to_string())
    }
}

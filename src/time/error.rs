use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("Malformed capture timestamp: {0:?}")]
    MalformedTimestamp(String),
}

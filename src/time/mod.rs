//! Capture time handling for photo metadata.
pub mod error;
mod parsing;
pub use parsing::parse_capture_timestamp;

//! Parsing of the EXIF capture timestamp into a chrono type.

use super::error::TimeError;
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

static RE_EXIF_DATETIME: OnceLock<Regex> = OnceLock::new();

/// Parses an EXIF `DateTimeOriginal` value (`YYYY:MM:DD HH:MM:SS`).
///
/// The shape is matched exactly before chrono validates the values, so
/// single-digit fields, dashes instead of colons, sub-seconds or trailing
/// offsets are all rejected. A trailing NUL, which EXIF ASCII values may
/// still carry, is ignored.
pub fn parse_capture_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let trimmed = s.trim_end_matches('\0');
    let re = RE_EXIF_DATETIME.get_or_init(|| {
        Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}$").expect("valid timestamp regex")
    });
    if !re.is_match(trimmed) {
        return Err(TimeError::MalformedTimestamp(s.to_string()));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y:%m:%d %H:%M:%S")
        .map_err(|_| TimeError::MalformedTimestamp(s.to_string()))
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed decimal position of a photo. South and west are negative.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres relative to sea level.
    pub altitude: f64,
}

/// A named place near a photo, as returned by the nearby-search API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub name: String,
    pub address: String,
}

/// One geolocated photo.
///
/// Created by the directory scan; afterwards only `point_of_interest` is ever
/// written, and only by the enrichment pass.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub file_name: String,
    pub captured_at: NaiveDateTime,
    pub location: GeoCoordinate,
    pub point_of_interest: Option<PointOfInterest>,
}

impl ImageRecord {
    pub fn new(file_name: impl Into<String>, captured_at: NaiveDateTime, location: GeoCoordinate) -> Self {
        Self {
            file_name: file_name.into(),
            captured_at,
            location,
            point_of_interest: None,
        }
    }

    /// Google Maps link centred on the photo's location.
    pub fn maps_url(&self) -> String {
        format!(
            "http://maps.google.com/?q=loc:{},{}",
            self.location.latitude, self.location.longitude
        )
    }
}

impl fmt::Display for ImageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(poi) = &self.point_of_interest {
            write!(f, "{} -> {} - ", poi.name, poi.address)?;
        }
        write!(
            f,
            "{} - ({:.4}, {:.4})",
            self.captured_at.format("%Y-%m-%d %H:%M:%S"),
            self.location.latitude,
            self.location.longitude
        )
    }
}

/// Counts produced by one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichSummary {
    pub total: usize,
    pub enriched: usize,
    pub failed: usize,
}

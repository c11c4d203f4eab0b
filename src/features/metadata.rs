use crate::features::error::ExtractError;
use crate::features::gps::{Axis, altitude_meters, axis_degrees};
use crate::structs::{GeoCoordinate, ImageRecord};
use crate::time::parse_capture_timestamp;
use std::collections::HashMap;
use tracing::debug;

/// Tag id of the GPS info directory in the primary image.
pub const TAG_GPS_INFO: u16 = 34853;
/// Tag id of `DateTimeOriginal`, the moment the shutter fired.
pub const TAG_DATE_TAKEN: u16 = 36867;

// Sub-indices inside the GPS directory.
pub const GPS_LATITUDE_REF: u16 = 1;
pub const GPS_LATITUDE: u16 = 2;
pub const GPS_LONGITUDE_REF: u16 = 3;
pub const GPS_LONGITUDE: u16 = 4;
pub const GPS_ALTITUDE_REF: u16 = 5;
pub const GPS_ALTITUDE: u16 = 6;

/// An unsigned EXIF rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub num: u32,
    pub denom: u32,
}

impl Fraction {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }
}

/// Payload of a single metadata tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Ascii(String),
    Byte(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Fraction>),
    /// A nested tag directory, such as the GPS IFD.
    Directory(HashMap<u16, TagValue>),
}

/// The raw metadata of one image, keyed by tag id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBlock {
    tags: HashMap<u16, TagValue>,
}

impl MetadataBlock {
    pub fn new(tags: HashMap<u16, TagValue>) -> Self {
        Self { tags }
    }

    pub fn get(&self, tag: u16) -> Option<&TagValue> {
        self.tags.get(&tag)
    }

    pub fn insert(&mut self, tag: u16, value: TagValue) {
        self.tags.insert(tag, value);
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The GPS directory, if the camera wrote one.
    pub fn gps(&self) -> Option<&HashMap<u16, TagValue>> {
        match self.tags.get(&TAG_GPS_INFO) {
            Some(TagValue::Directory(gps)) => Some(gps),
            _ => None,
        }
    }
}

fn get_ascii(tags: &HashMap<u16, TagValue>, tag: u16) -> Result<&str, ExtractError> {
    match tags.get(&tag) {
        Some(TagValue::Ascii(s)) => Ok(s),
        Some(_) => Err(ExtractError::UnexpectedPayload(tag)),
        None => Err(ExtractError::MissingTag(tag)),
    }
}

fn get_rationals(tags: &HashMap<u16, TagValue>, tag: u16) -> Result<&[Fraction], ExtractError> {
    match tags.get(&tag) {
        Some(TagValue::Rational(values)) => Ok(values),
        Some(_) => Err(ExtractError::UnexpectedPayload(tag)),
        None => Err(ExtractError::MissingTag(tag)),
    }
}

fn is_below_sea_level(gps: &HashMap<u16, TagValue>) -> bool {
    matches!(gps.get(&GPS_ALTITUDE_REF), Some(TagValue::Byte(b)) if b.first() == Some(&1))
}

fn get_location(gps: &HashMap<u16, TagValue>) -> Result<GeoCoordinate, ExtractError> {
    let latitude = axis_degrees(
        Axis::Latitude,
        get_rationals(gps, GPS_LATITUDE)?,
        get_ascii(gps, GPS_LATITUDE_REF)?,
    )?;
    let longitude = axis_degrees(
        Axis::Longitude,
        get_rationals(gps, GPS_LONGITUDE)?,
        get_ascii(gps, GPS_LONGITUDE_REF)?,
    )?;
    let altitude_fraction = get_rationals(gps, GPS_ALTITUDE)?
        .first()
        .copied()
        .ok_or(ExtractError::UnexpectedPayload(GPS_ALTITUDE))?;
    let altitude = altitude_meters(altitude_fraction)?;

    Ok(GeoCoordinate {
        latitude,
        longitude,
        altitude: if is_below_sea_level(gps) {
            -altitude
        } else {
            altitude
        },
    })
}

/// Builds a record from a metadata block.
///
/// `Ok(None)` means the image simply has no GPS directory. Any structural or
/// decoding problem is an error.
pub fn try_extract_record(
    block: &MetadataBlock,
    file_name: &str,
) -> Result<Option<ImageRecord>, ExtractError> {
    let Some(gps) = block.gps() else {
        return Ok(None);
    };
    let location = get_location(gps)?;

    let captured_at = match block.get(TAG_DATE_TAKEN) {
        Some(TagValue::Ascii(s)) => parse_capture_timestamp(s)?,
        Some(_) => return Err(ExtractError::UnexpectedPayload(TAG_DATE_TAKEN)),
        None => return Err(ExtractError::MissingTag(TAG_DATE_TAKEN)),
    };

    Ok(Some(ImageRecord::new(file_name, captured_at, location)))
}

/// Same as [`try_extract_record`], but a broken block counts as "no geolocation".
pub fn extract_record(block: &MetadataBlock, file_name: &str) -> Option<ImageRecord> {
    match try_extract_record(block, file_name) {
        Ok(record) => record,
        Err(err) => {
            debug!(file = file_name, error = %err, "discarding unreadable metadata");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::error::CoordinateError;
    use crate::time::error::TimeError;

    fn dms(d: u32, m: u32, s_hundredths: u32) -> TagValue {
        TagValue::Rational(vec![
            Fraction::new(d, 1),
            Fraction::new(m, 1),
            Fraction::new(s_hundredths, 100),
        ])
    }

    pub(crate) fn gps_directory(lat_ref: &str, lon_ref: &str) -> HashMap<u16, TagValue> {
        HashMap::from([
            (0, TagValue::Byte(vec![2, 2, 0, 0])),
            (GPS_LATITUDE_REF, TagValue::Ascii(lat_ref.to_string())),
            (GPS_LATITUDE, dms(52, 22, 4508)),
            (GPS_LONGITUDE_REF, TagValue::Ascii(lon_ref.to_string())),
            (GPS_LONGITUDE, dms(4, 53, 5795)),
            (
                GPS_ALTITUDE,
                TagValue::Rational(vec![Fraction::new(105, 10)]),
            ),
        ])
    }

    /// A metadata block shaped like a phone photo taken at `date_taken`.
    pub(crate) fn gps_block(date_taken: &str) -> MetadataBlock {
        MetadataBlock::new(HashMap::from([
            (TAG_GPS_INFO, TagValue::Directory(gps_directory("N", "E"))),
            (TAG_DATE_TAKEN, TagValue::Ascii(date_taken.to_string())),
            (271, TagValue::Ascii("Google".to_string())),
        ]))
    }

    #[test]
    fn test_extracts_full_record() {
        let record = try_extract_record(&gps_block("2014:12:24 10:10:14"), "dam.jpg")
            .unwrap()
            .expect("block has GPS data");

        assert_eq!(record.file_name, "dam.jpg");
        assert_eq!(record.captured_at.to_string(), "2014-12-24 10:10:14");
        assert!((record.location.latitude - 52.379_189).abs() < 1e-6);
        assert!((record.location.longitude - 4.899_431).abs() < 1e-6);
        assert_eq!(record.location.altitude, 10.5);
        assert!(record.point_of_interest.is_none());
    }

    #[test]
    fn test_southern_western_hemisphere_is_negative() {
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps_directory("S", "W")));

        let record = extract_record(&block, "south.jpg").unwrap();
        assert!(record.location.latitude < 0.0);
        assert!(record.location.longitude < 0.0);
    }

    #[test]
    fn test_altitude_ref_marks_below_sea_level() {
        let mut gps = gps_directory("N", "E");
        gps.insert(GPS_ALTITUDE_REF, TagValue::Byte(vec![1]));
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));

        let record = extract_record(&block, "dead_sea.jpg").unwrap();
        assert_eq!(record.location.altitude, -10.5);
    }

    #[test]
    fn test_missing_gps_tag_is_not_an_error() {
        let block = MetadataBlock::new(HashMap::from([(
            TAG_DATE_TAKEN,
            TagValue::Ascii("2014:12:24 10:10:14".to_string()),
        )]));
        assert_eq!(try_extract_record(&block, "no_gps.jpg"), Ok(None));
        assert_eq!(try_extract_record(&MetadataBlock::default(), "empty.jpg"), Ok(None));
    }

    #[test]
    fn test_missing_sub_index_discards_file() {
        let mut gps = gps_directory("N", "E");
        gps.remove(&GPS_ALTITUDE);
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));

        assert_eq!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::MissingTag(GPS_ALTITUDE))
        );
        assert!(extract_record(&block, "a.jpg").is_none());
    }

    #[test]
    fn test_wrong_payload_type_discards_file() {
        let mut gps = gps_directory("N", "E");
        gps.insert(GPS_LATITUDE, TagValue::Ascii("52.37".to_string()));
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));

        assert_eq!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::UnexpectedPayload(GPS_LATITUDE))
        );

        // A GPS tag that is not a directory is not a usable GPS block either.
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Long(vec![1234]));
        assert_eq!(try_extract_record(&block, "a.jpg"), Ok(None));
    }

    #[test]
    fn test_codec_failures_discard_file() {
        let mut gps = gps_directory("N", "E");
        gps.insert(
            GPS_LONGITUDE,
            TagValue::Rational(vec![
                Fraction::new(4, 0),
                Fraction::new(53, 1),
                Fraction::new(0, 1),
            ]),
        );
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));
        assert!(matches!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::Coordinate(CoordinateError::MalformedCoordinate(_)))
        ));

        let block = gps_block("24/12/2014 10:10");
        assert!(matches!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::Time(TimeError::MalformedTimestamp(_)))
        ));
        assert!(extract_record(&block, "a.jpg").is_none());
    }

    #[test]
    fn test_swapped_hemisphere_references_discard_file() {
        let mut gps = gps_directory("E", "E");
        gps.insert(
            GPS_LATITUDE,
            TagValue::Rational(vec![
                Fraction::new(120, 1),
                Fraction::new(0, 1),
                Fraction::new(0, 1),
            ]),
        );
        let mut block = gps_block("2014:12:24 10:10:14");
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));
        assert!(matches!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::Coordinate(CoordinateError::MalformedCoordinate(_)))
        ));

        for (lat_ref, lon_ref) in [("W", "E"), ("N", "S"), ("N", "N")] {
            let mut block = gps_block("2014:12:24 10:10:14");
            block.insert(TAG_GPS_INFO, TagValue::Directory(gps_directory(lat_ref, lon_ref)));
            assert!(
                extract_record(&block, "a.jpg").is_none(),
                "{lat_ref}/{lon_ref} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_date_discards_file() {
        let block = MetadataBlock::new(HashMap::from([(
            TAG_GPS_INFO,
            TagValue::Directory(gps_directory("N", "E")),
        )]));
        assert_eq!(
            try_extract_record(&block, "a.jpg"),
            Err(ExtractError::MissingTag(TAG_DATE_TAKEN))
        );
    }
}

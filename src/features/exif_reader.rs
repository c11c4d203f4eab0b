use crate::features::metadata::{Fraction, MetadataBlock, TAG_GPS_INFO, TagValue};
use exif::{Context, Field, In, Reader, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Anything that can hand out the raw metadata block of an image file.
pub trait MetadataSource: Send + Sync {
    /// `None` when the file has no readable metadata at all.
    fn read_metadata_block(&self, path: &Path) -> Option<MetadataBlock>;
}

/// Reads EXIF from JPEG, PNG, TIFF, HEIF and WebP containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifFileReader;

fn convert_value(value: &Value) -> Option<TagValue> {
    match value {
        Value::Ascii(parts) => {
            let first = parts.first().map(Vec::as_slice).unwrap_or_default();
            Some(TagValue::Ascii(String::from_utf8_lossy(first).into_owned()))
        }
        Value::Byte(bytes) => Some(TagValue::Byte(bytes.clone())),
        Value::Short(shorts) => Some(TagValue::Short(shorts.clone())),
        Value::Long(longs) => Some(TagValue::Long(longs.clone())),
        Value::Rational(rationals) => Some(TagValue::Rational(
            rationals
                .iter()
                .map(|r| Fraction::new(r.num, r.denom))
                .collect(),
        )),
        _ => None,
    }
}

/// Flattens the primary IFD into a block, nesting the GPS fields under
/// [`TAG_GPS_INFO`] the way they are laid out in the file.
pub fn block_from_fields<'a>(fields: impl IntoIterator<Item = &'a Field>) -> MetadataBlock {
    let mut block = MetadataBlock::default();
    let mut gps = HashMap::new();

    for field in fields {
        if field.ifd_num != In::PRIMARY {
            continue;
        }
        let Some(value) = convert_value(&field.value) else {
            continue;
        };
        match field.tag.context() {
            Context::Gps => {
                gps.insert(field.tag.number(), value);
            }
            Context::Tiff | Context::Exif => block.insert(field.tag.number(), value),
            _ => {}
        }
    }

    if !gps.is_empty() {
        block.insert(TAG_GPS_INFO, TagValue::Directory(gps));
    }
    block
}

impl MetadataSource for ExifFileReader {
    fn read_metadata_block(&self, path: &Path) -> Option<MetadataBlock> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(err) => {
                trace!(?path, error = %err, "no EXIF data");
                return None;
            }
        };
        let block = block_from_fields(exif.fields());
        (!block.is_empty()).then_some(block)
    }
}

use crate::features::exif_reader::{ExifFileReader, MetadataSource};
use crate::features::metadata::extract_record;
use crate::structs::ImageRecord;
use crate::utils::list_image_files;
use bon::bon;
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not read directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: walkdir::Error,
    },
}

/// Walks one directory and turns every geotagged image into an [`ImageRecord`].
pub struct Scanner {
    source: Arc<dyn MetadataSource>,
    extensions: Vec<String>,
}

#[bon]
impl Scanner {
    /// # Builder Arguments
    ///
    /// * `source` - Where metadata blocks come from. Defaults to [`ExifFileReader`].
    /// * `extensions` - Accepted file extensions, without the dot, compared
    ///   case-insensitively. Defaults to `jpg` and `png`.
    #[builder]
    pub fn new(
        source: Option<Arc<dyn MetadataSource>>,
        #[builder(default = vec!["jpg".to_string(), "png".to_string()])] extensions: Vec<String>,
    ) -> Self {
        Self {
            source: source.unwrap_or_else(|| Arc::new(ExifFileReader)),
            extensions,
        }
    }

    /// Extracts records from the direct entries of `dir`.
    ///
    /// Files without GPS data, with broken metadata, or with an unaccepted
    /// extension are left out. The records come back in directory-listing
    /// order, not sorted by time.
    ///
    /// # Errors
    ///
    /// [`ScanError::Directory`] if `dir` itself cannot be read.
    pub fn scan(&self, dir: &Path) -> Result<Vec<ImageRecord>, ScanError> {
        let files = list_image_files(dir, &self.extensions).map_err(|source| ScanError::Directory {
            path: dir.display().to_string(),
            source,
        })?;
        let candidates = files.len();

        let records: Vec<ImageRecord> = files
            .par_iter()
            .filter_map(|path| {
                let file_name = path.file_name()?.to_string_lossy();
                let Some(block) = self.source.read_metadata_block(path) else {
                    debug!(file = %file_name, "no metadata block");
                    return None;
                };
                extract_record(&block, &file_name)
            })
            .collect();

        info!(
            dir = %dir.display(),
            candidates,
            located = records.len(),
            "scanned directory"
        );
        Ok(records)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::exif_reader::tests::{jpeg_with_exif, phone_fields};
    use crate::features::metadata::MetadataBlock;
    use crate::features::metadata::tests::gps_block;
    use exif::{Field, In, Tag, Value};
    use std::fs;

    /// Treats file contents as a fake metadata block: `gps <timestamp>` yields
    /// a geotagged block, `plain` a block without GPS, anything else nothing.
    pub(crate) struct ContentSource;

    impl MetadataSource for ContentSource {
        fn read_metadata_block(&self, path: &Path) -> Option<MetadataBlock> {
            let contents = fs::read_to_string(path).ok()?;
            if let Some(timestamp) = contents.strip_prefix("gps ") {
                Some(gps_block(timestamp.trim()))
            } else if contents == "plain" {
                Some(MetadataBlock::default())
            } else {
                None
            }
        }
    }

    pub(crate) fn content_scanner() -> Scanner {
        Scanner::builder().source(Arc::new(ContentSource)).build()
    }

    #[test]
    fn test_mixed_directory_yields_only_geotagged_images() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.jpg"), "gps 2015:01:02 12:00:00").unwrap();
        fs::write(dir.path().join("two.PNG"), "gps 2014:12:24 10:10:14").unwrap();
        fs::write(dir.path().join("three.jpg"), "plain").unwrap();
        fs::write(dir.path().join("readme.txt"), "gps 2014:12:24 10:10:14").unwrap();

        let records = content_scanner().scan(dir.path()).unwrap();

        assert_eq!(records.len(), 2);
        let mut names: Vec<_> = records.iter().map(|r| r.file_name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["one.jpg", "two.PNG"]);
    }

    #[test]
    fn test_default_scanner_reads_real_exif() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("geotagged.jpg"), jpeg_with_exif(&phone_fields())).unwrap();
        let camera_only = [Field {
            tag: Tag::DateTimeOriginal,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"2015:01:02 12:00:00".to_vec()]),
        }];
        fs::write(dir.path().join("no_gps.jpg"), jpeg_with_exif(&camera_only)).unwrap();
        fs::write(dir.path().join("broken.jpg"), [0xff, 0xd8, 0x00]).unwrap();
        fs::write(dir.path().join("notes.txt"), jpeg_with_exif(&phone_fields())).unwrap();

        let records = Scanner::builder().build().scan(dir.path()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "geotagged.jpg");
        assert!(records[0].location.latitude < 0.0);
        assert_eq!(records[0].captured_at.to_string(), "2014-12-24 10:10:14");
    }

    #[test]
    fn test_corrupt_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.jpg"), "gps 2015:01:02 12:00:00").unwrap();
        fs::write(dir.path().join("bad_time.jpg"), "gps yesterday").unwrap();
        fs::write(dir.path().join("garbage.jpg"), [0xff, 0xd8, 0x00]).unwrap();

        let records = content_scanner().scan(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "good.jpg");
    }

    #[test]
    fn test_rescanning_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), "gps 2015:01:02 12:00:00").unwrap();
        fs::write(dir.path().join("b.jpg"), "gps 2014:12:24 10:10:14").unwrap();

        let scanner = content_scanner();
        assert_eq!(scanner.scan(dir.path()).unwrap(), scanner.scan(dir.path()).unwrap());
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), "gps 2015:01:02 12:00:00").unwrap();
        fs::write(dir.path().join("b.tiff"), "gps 2014:12:24 10:10:14").unwrap();

        let scanner = Scanner::builder()
            .source(Arc::new(ContentSource))
            .extensions(vec!["tiff".to_string()])
            .build();
        let records = scanner.scan(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "b.tiff");
    }

    #[test]
    fn test_unreadable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = content_scanner().scan(&dir.path().join("missing"));
        assert!(matches!(result, Err(ScanError::Directory { .. })));
    }

    #[test]
    fn test_default_extensions_are_jpg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.PNG", "c.jpeg", "d.tiff", "e.gif"] {
            fs::write(dir.path().join(name), "gps 2015:01:02 12:00:00").unwrap();
        }

        let mut names: Vec<_> = content_scanner()
            .scan(dir.path())
            .unwrap()
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
    }
}

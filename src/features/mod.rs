pub mod error;
pub mod exif_reader;
pub mod gps;
pub mod metadata;
pub mod places;

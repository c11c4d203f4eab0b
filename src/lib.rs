//! # EXIF Analyser
//!
//! Find out where, and near what, a folder of photos was taken.
//!
//! The crate reads the GPS position and capture time from each photo's EXIF
//! block, keeps the photos ordered by capture time, and then asks the Google
//! Places nearby-search API for the closest establishment to each of them.
//! Those lookups run concurrently and report their progress as they finish.
//!
//! ## Key Features
//!
//! - **GPS decoding**: degrees/minutes/seconds rationals plus hemisphere letters to signed decimal degrees.
//! - **Capture time**: strict parsing of `DateTimeOriginal`.
//! - **Chronological store**: stable, ascending by capture time.
//! - **Points of interest**: one concurrent lookup per photo, with a per-lookup timeout and an optional concurrency cap.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use exif_analyser::ExifAnalyser;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let mut analyser = ExifAnalyser::builder().api_key("AIza...").build()?;
//!     analyser.load_directory(Path::new("assets"))?;
//!
//!     if analyser.can_analyse() {
//!         analyser.analyse(&mut |percent: u8| println!("{percent}%")).await?;
//!     }
//!     for record in analyser.records() {
//!         println!("{record}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod enrich;
mod error;
pub mod exif_analyser;
pub mod features;
pub mod scanner;
pub mod store;
pub mod structs;
pub mod time;
pub mod utils;

pub use enrich::{EnrichError, Enricher, ProgressSink};
pub use error::ExifAnalyserError;
pub use exif_analyser::ExifAnalyser;
pub use features::exif_reader::{ExifFileReader, MetadataSource};
pub use features::metadata::{MetadataBlock, TagValue};
pub use features::places::{PlacesClient, PoiLookup};
pub use structs::{EnrichSummary, GeoCoordinate, ImageRecord, PointOfInterest};

use thiserror::Error;

/// The primary error type for the exif-analyser crate.
///
/// Per-file extraction errors and per-record lookup errors never show up
/// here; they are absorbed by the scan and the enrichment pass.
#[derive(Error, Debug)]
pub enum ExifAnalyserError {
    #[error("Directory scan failed: {0}")]
    Scan(#[from] crate::scanner::ScanError),

    #[error(transparent)]
    Enrich(#[from] crate::enrich::EnrichError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("HTTP client could not be initialised")]
    Http(#[from] reqwest::Error),
}

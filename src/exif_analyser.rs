use crate::ExifAnalyserError;
use crate::enrich::{Enricher, ProgressSink};
use crate::features::exif_reader::MetadataSource;
use crate::features::places::{PlacesClient, PoiLookup};
use crate::scanner::Scanner;
use crate::store::RecordStore;
use crate::structs::{EnrichSummary, ImageRecord};
use bon::bon;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// The main entry point: load a directory of photos, then look up a point of
/// interest for each of them.
///
/// ```rust,no_run
/// # use exif_analyser::{ExifAnalyser, ExifAnalyserError};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ExifAnalyserError> {
/// let mut analyser = ExifAnalyser::builder().api_key("AIza...").build()?;
/// analyser.load_directory(Path::new("holiday"))?;
/// analyser.analyse(&mut |percent: u8| println!("{percent}%")).await?;
/// for record in analyser.records() {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ExifAnalyser {
    scanner: Scanner,
    enricher: Enricher,
    store: RecordStore,
}

#[bon]
impl ExifAnalyser {
    /// Constructs an `ExifAnalyser` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `api_key: String` - (Default: empty) Places API key. Without one,
    ///   [`ExifAnalyser::can_analyse`] is `false` and [`ExifAnalyser::analyse`] fails.
    /// * `endpoint: Option<String>` - Override for the nearby-search URL.
    /// * `lookup: Option<Arc<dyn PoiLookup>>` - Replaces the Places client entirely.
    ///   `api_key` and `endpoint` are ignored when this is set.
    /// * `metadata_source: Option<Arc<dyn MetadataSource>>` - Replaces the EXIF file reader.
    /// * `extensions: Option<Vec<String>>` - Accepted file extensions, `jpg` and `png` if unset.
    /// * `lookup_timeout: Duration` - (Default: 10 s) Upper bound on one lookup.
    /// * `max_concurrent_lookups: Option<usize>` - (Default: unlimited) Cap on lookups in flight.
    ///
    /// # Errors
    ///
    /// [`ExifAnalyserError::Http`] if the HTTP client cannot be created.
    #[builder]
    pub fn new(
        #[builder(into, default)] api_key: String,
        #[builder(into)] endpoint: Option<String>,
        lookup: Option<Arc<dyn PoiLookup>>,
        metadata_source: Option<Arc<dyn MetadataSource>>,
        extensions: Option<Vec<String>>,
        #[builder(default = Duration::from_secs(10))] lookup_timeout: Duration,
        max_concurrent_lookups: Option<usize>,
    ) -> Result<Self, ExifAnalyserError> {
        let lookup: Arc<dyn PoiLookup> = match lookup {
            Some(lookup) => lookup,
            None => Arc::new(
                PlacesClient::builder()
                    .api_key(api_key)
                    .maybe_endpoint(endpoint)
                    .timeout(lookup_timeout)
                    .build()?,
            ),
        };
        let scanner = Scanner::builder()
            .maybe_source(metadata_source)
            .maybe_extensions(extensions)
            .build();
        let enricher = Enricher::builder()
            .lookup(lookup)
            .lookup_timeout(lookup_timeout)
            .maybe_max_concurrent_lookups(max_concurrent_lookups)
            .build();

        Ok(Self {
            scanner,
            enricher,
            store: RecordStore::new(),
        })
    }

    /// Replaces the loaded records with the geotagged photos in `dir`, oldest first.
    ///
    /// # Errors
    ///
    /// [`ExifAnalyserError::Scan`] if the directory cannot be read. The
    /// previously loaded records are kept in that case.
    pub fn load_directory(&mut self, dir: &Path) -> Result<&[ImageRecord], ExifAnalyserError> {
        let records = self.scanner.scan(dir)?;
        self.store.insert_all(records);
        Ok(self.store.all())
    }

    /// Whether [`ExifAnalyser::analyse`] can run, i.e. an API key is configured.
    pub fn can_analyse(&self) -> bool {
        self.enricher.is_enabled()
    }

    /// Looks up a point of interest for every loaded record.
    ///
    /// # Errors
    ///
    /// [`ExifAnalyserError::Enrich`] when lookups are disabled.
    pub async fn analyse(
        &mut self,
        progress: &mut impl ProgressSink,
    ) -> Result<EnrichSummary, ExifAnalyserError> {
        Ok(self.enricher.enrich(&mut self.store, progress).await?)
    }

    pub fn records(&self) -> &[ImageRecord] {
        self.store.all()
    }

    pub fn record(&self, index: usize) -> Option<&ImageRecord> {
        self.store.get(index)
    }
}

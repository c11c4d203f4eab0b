use crate::features::error::LookupError;
use crate::structs::PointOfInterest;
use async_trait::async_trait;
use bon::bon;
use serde::Deserialize;
use std::time::Duration;

pub const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// Resolves a coordinate pair to the closest point of interest.
#[async_trait]
pub trait PoiLookup: Send + Sync {
    /// Whether lookups can be made at all, e.g. an API key is configured.
    fn is_enabled(&self) -> bool;

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<PointOfInterest, LookupError>;
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    name: String,
    vicinity: String,
}

/// Pulls the closest place out of a nearby-search response body.
pub fn parse_nearby_search(body: &str) -> Result<PointOfInterest, LookupError> {
    let response: NearbySearchResponse =
        serde_json::from_str(body).map_err(|_| LookupError::LookupEmpty)?;
    response
        .results
        .into_iter()
        .next()
        .map(|place| PointOfInterest {
            name: place.name,
            address: place.vicinity,
        })
        .ok_or(LookupError::LookupEmpty)
}

/// Client for the Places nearby-search endpoint, ranked by distance and
/// restricted to establishments.
pub struct PlacesClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[bon]
impl PlacesClient {
    /// # Builder Arguments
    ///
    /// * `api_key: String` - Places API key. An empty key disables the client.
    /// * `endpoint: String` - (Default: [`NEARBY_SEARCH_URL`]) Base URL of the nearby-search API.
    /// * `timeout: Duration` - (Default: 10 s) Transport timeout for a single request.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed (TLS backend
    /// initialisation).
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into, default = NEARBY_SEARCH_URL.to_string())] endpoint: String,
        #[builder(default = Duration::from_secs(10))] timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl PoiLookup for PlacesClient {
    fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<PointOfInterest, LookupError> {
        let body = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("location", format!("{latitude},{longitude}")),
                ("rankby", "distance".to_string()),
                ("types", "establishment".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_nearby_search(&body)
    }
}

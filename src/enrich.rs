//! Concurrent point-of-interest enrichment of loaded records.

use crate::features::error::LookupError;
use crate::features::places::PoiLookup;
use crate::store::RecordStore;
use crate::structs::EnrichSummary;
use bon::bon;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnrichError {
    #[error("Point of interest lookups are disabled: no API key configured")]
    CapabilityDisabled,
}

/// Receives the percentage of finished lookups, from 0 to 100.
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent);
    }
}

/// Fans out one lookup per record and writes the results back into the store.
pub struct Enricher {
    lookup: Arc<dyn PoiLookup>,
    lookup_timeout: Duration,
    max_concurrent_lookups: Option<usize>,
}

#[bon]
impl Enricher {
    /// # Builder Arguments
    ///
    /// * `lookup` - The geocoding service used for every record.
    /// * `lookup_timeout: Duration` - (Default: 10 s) Upper bound on a single
    ///   lookup. A lookup that runs out of time counts as unavailable.
    /// * `max_concurrent_lookups: Option<usize>` - (Default: unlimited) Cap on
    ///   lookups in flight at the same time.
    #[builder]
    pub fn new(
        lookup: Arc<dyn PoiLookup>,
        #[builder(default = Duration::from_secs(10))] lookup_timeout: Duration,
        max_concurrent_lookups: Option<usize>,
    ) -> Self {
        Self {
            lookup,
            lookup_timeout,
            max_concurrent_lookups,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.lookup.is_enabled()
    }

    /// Looks up a point of interest for every record in `store`.
    ///
    /// All lookups run concurrently and the call returns once each of them has
    /// finished or timed out. Progress is reported after every finished lookup
    /// and always ends with 100. A failed lookup leaves its record without a
    /// point of interest; it never fails the batch.
    ///
    /// # Errors
    ///
    /// [`EnrichError::CapabilityDisabled`] if the lookup service is disabled.
    /// Nothing is launched in that case.
    pub async fn enrich(
        &self,
        store: &mut RecordStore,
        progress: &mut impl ProgressSink,
    ) -> Result<EnrichSummary, EnrichError> {
        if !self.is_enabled() {
            return Err(EnrichError::CapabilityDisabled);
        }

        let records = store.records_mut();
        let total = records.len();
        let mut summary = EnrichSummary {
            total,
            ..EnrichSummary::default()
        };
        if total == 0 {
            progress.report(100);
            return Ok(summary);
        }

        let limiter = self
            .max_concurrent_lookups
            .map(|limit| Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS))));
        let mut tasks = JoinSet::new();
        for (index, record) in records.iter().enumerate() {
            let lookup = Arc::clone(&self.lookup);
            let limiter = limiter.clone();
            let timeout = self.lookup_timeout;
            let (latitude, longitude) = (record.location.latitude, record.location.longitude);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquiring cannot fail.
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                let result = tokio::time::timeout(timeout, lookup.lookup(latitude, longitude))
                    .await
                    .unwrap_or_else(|_| {
                        Err(LookupError::LookupUnavailable(format!(
                            "timed out after {timeout:?}"
                        )))
                    });
                (index, result)
            });
        }

        let mut finished = 0;
        while let Some(joined) = tasks.join_next().await {
            finished += 1;
            match joined {
                Ok((index, Ok(poi))) => {
                    records[index].point_of_interest = Some(poi);
                    summary.enriched += 1;
                }
                Ok((index, Err(err))) => {
                    warn!(file = %records[index].file_name, error = %err, "lookup failed");
                    summary.failed += 1;
                }
                Err(err) => {
                    warn!(error = %err, "lookup task aborted");
                    summary.failed += 1;
                }
            }
            progress.report(percent(finished, total));
        }

        info!(
            total = summary.total,
            enriched = summary.enriched,
            failed = summary.failed,
            "enrichment finished"
        );
        Ok(summary)
    }
}

fn percent(finished: usize, total: usize) -> u8 {
    u8::try_from(finished * 100 / total).unwrap_or(100)
}

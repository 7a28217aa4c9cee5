//! The ingest job: validate a fetched batch, then store every valid property.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::IngestConfig;
use crate::ingest::{PropertyIngestService, PropertySource};
use crate::storage::PropertyStore;

/// What one run of the ingest job did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Run timestamp, `None` when the job was disabled.
    pub run: Option<DateTime<Utc>>,
    pub valid: usize,
    pub invalid: usize,
    /// Ids of the properties committed, in batch order.
    pub persisted: Vec<i64>,
    /// 1-based positions of valid properties that could not be stored.
    pub failed: Vec<usize>,
}

/// Runs the ingest job against a source and a store.
pub struct PropertyService<S, R>
where
    S: PropertySource,
    R: PropertyStore,
{
    ingest: PropertyIngestService<S>,
    repository: R,
    config: IngestConfig,
}

impl<S, R> PropertyService<S, R>
where
    S: PropertySource,
    R: PropertyStore,
{
    pub fn new(source: S, repository: R, config: IngestConfig) -> Self {
        Self {
            ingest: PropertyIngestService::new(source, config.clone()),
            repository,
            config,
        }
    }

    /// Ingests a batch and persists each valid property on its own.
    ///
    /// A property that fails to persist is logged and skipped; the rest of
    /// the batch is still attempted. Every property of a run is stored under
    /// the run's timestamp.
    pub async fn run_ingest_job(&self) -> RunSummary {
        if !self.config.enable_property_ingest {
            return RunSummary::default();
        }

        info!("Starting ingest properties job.");

        let result = self.ingest.ingest().await;
        let mut summary = RunSummary {
            run: Some(result.run()),
            valid: result.valid_properties().len(),
            invalid: result.invalid_records().len(),
            ..RunSummary::default()
        };

        if !result.succeeded() {
            warn!(
                invalid = summary.invalid,
                "Failed to ingest properties, nothing will be persisted."
            );
            return summary;
        }

        info!(
            valid = summary.valid,
            invalid = summary.invalid,
            "Successfully validated properties."
        );

        for (index, property) in (1..).zip(result.valid_properties()) {
            match self.repository.insert(result.run(), property).await {
                Ok(property_id) => {
                    info!(index, property_id, "Successfully persisted property.");
                    summary.persisted.push(property_id);
                }
                Err(e) => {
                    error!(index, error = %e, "Failed to persist property.");
                    summary.failed.push(index);
                }
            }
        }

        info!(
            persisted = summary.persisted.len(),
            failed = summary.failed.len(),
            "Ingest properties job finished."
        );

        summary
    }
}

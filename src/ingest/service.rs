//! Fetches a batch of raw records and validates each one independently.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::IngestConfig;
use crate::error::ValidationError;
use crate::ingest::factory;
use crate::ingest::traits::PropertySource;
use crate::ingest::types::RawPropertyRecord;
use crate::models::Property;

/// A fetched record that failed validation, with the rule it broke.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRecord {
    /// The record as received; `None` when the source sent a null entry.
    pub record: Option<RawPropertyRecord>,
    pub error: ValidationError,
}

impl InvalidRecord {
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Outcome of one ingest run.
#[derive(Debug, Clone)]
pub struct IngestResult {
    run: DateTime<Utc>,
    succeeded: bool,
    valid_properties: Vec<Property>,
    invalid_records: Vec<InvalidRecord>,
}

impl IngestResult {
    /// An empty result for a run that was skipped or could not fetch.
    pub fn unsuccessful(run: DateTime<Utc>) -> Self {
        Self {
            run,
            succeeded: false,
            valid_properties: Vec::new(),
            invalid_records: Vec::new(),
        }
    }

    /// Timestamp identifying the run. Every property persisted from this
    /// result is stored under it.
    pub fn run(&self) -> DateTime<Utc> {
        self.run
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn valid_properties(&self) -> &[Property] {
        &self.valid_properties
    }

    pub fn invalid_records(&self) -> &[InvalidRecord] {
        &self.invalid_records
    }
}

/// Service that pulls records from a [`PropertySource`] and partitions them
/// into valid properties and invalid records.
pub struct PropertyIngestService<S>
where
    S: PropertySource,
{
    source: S,
    config: IngestConfig,
}

impl<S> PropertyIngestService<S>
where
    S: PropertySource,
{
    pub fn new(source: S, config: IngestConfig) -> Self {
        Self { source, config }
    }

    /// Fetches and validates one batch.
    ///
    /// Never fails: a disabled ingest or a failed fetch yields an empty,
    /// unsuccessful result, and an invalid record is reported in
    /// [`IngestResult::invalid_records`] without affecting its neighbours.
    /// The run succeeds only when the batch was non-empty and at least one
    /// record was valid.
    pub async fn ingest(&self) -> IngestResult {
        let run = Utc::now();

        if !self.config.enable_property_ingest {
            return IngestResult::unsuccessful(run);
        }

        let batch = match self.source.get_properties().await {
            Ok(batch) => batch,
            Err(e) => {
                error!(
                    source = self.source.source_name(),
                    error = %format!("{e:#}"),
                    "Failed to ingest properties"
                );
                return IngestResult::unsuccessful(run);
            }
        };

        let total = batch.len();
        let mut valid_properties = Vec::new();
        let mut invalid_records = Vec::new();

        for (index, record) in batch.into_iter().enumerate() {
            match factory::create(record.as_ref()) {
                Ok(property) => valid_properties.push(property),
                Err(error) => {
                    warn!(
                        index,
                        reason = %error,
                        record = ?record,
                        "Property ingest failed to import property"
                    );
                    invalid_records.push(InvalidRecord { record, error });
                }
            }
        }

        let succeeded = total > 0 && !valid_properties.is_empty();

        info!(
            total,
            valid = valid_properties.len(),
            invalid = invalid_records.len(),
            succeeded,
            "Validated property batch"
        );

        IngestResult {
            run,
            succeeded,
            valid_properties,
            invalid_records,
        }
    }
}

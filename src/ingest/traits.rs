use anyhow::Result;
use async_trait::async_trait;

use crate::ingest::types::RawBatch;

/// Source of raw property records.
/// Implemented by the HTTP client and by in-memory fakes in tests.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch the current batch of property records
    async fn get_properties(&self) -> Result<RawBatch>;

    /// Get the name of the source
    fn source_name(&self) -> &str;
}

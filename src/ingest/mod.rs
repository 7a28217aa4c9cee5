pub mod client;
pub mod factory;
pub mod service;
pub mod traits;
pub mod types;

pub use client::PropertyIngestClient;
pub use service::{IngestResult, InvalidRecord, PropertyIngestService};
pub use traits::PropertySource;
pub use types::{RawBatch, RawBedroom, RawPropertyRecord};

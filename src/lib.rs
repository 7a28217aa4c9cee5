//! Ingests rental property listings from an external source, validates
//! them against the domain rules and stores the valid ones.

pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;
pub mod storage;

pub use config::{DbConfig, IngestConfig};
pub use error::{AppError, ValidationError};
pub use service::{PropertyService, RunSummary};

use anyhow::Context;
use rental_ingest::ingest::PropertyIngestClient;
use rental_ingest::storage::{schema, PropertiesRepository};
use rental_ingest::{DbConfig, IngestConfig, PropertyService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Rental Ingest - property ingest job");

    let ingest_config = IngestConfig::from_env().context("Failed to load ingest configuration")?;
    let db_config = DbConfig::from_env().context("Failed to load database configuration")?;

    if !ingest_config.enable_property_ingest {
        info!("Property ingest is disabled, set PROPERTY_INGEST_ENABLED=true to run it");
        return Ok(());
    }

    let pool = schema::connect(&db_config)
        .await
        .context("Failed to connect to database")?;
    let client = PropertyIngestClient::new(&ingest_config)?;

    let service = PropertyService::new(client, PropertiesRepository::new(pool), ingest_config);
    let summary = service.run_ingest_job().await;

    info!(
        valid = summary.valid,
        invalid = summary.invalid,
        persisted = summary.persisted.len(),
        failed = summary.failed.len(),
        "✅ Ingest run complete"
    );

    Ok(())
}

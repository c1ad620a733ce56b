//! Mart builder: batch star-schema materialization.
//!
//! One run reads two NDJSON sources and replaces five Parquet relations:
//! - catalog records  → works, creators
//! - usage-event logs → users, time, usage_facts

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use parquet_store::ParquetStore;
use telemetry::{init_tracing_from_env, metrics};
use transform::{run_catalog_pipeline, run_events_pipeline, source, CatalogSummary};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    /// Root of the catalog-record source tree
    #[serde(default = "default_catalog_dir")]
    catalog_dir: PathBuf,

    /// Root of the usage-event log tree
    #[serde(default = "default_events_dir")]
    events_dir: PathBuf,

    /// Root of the output mart
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from("data/catalog")
}

fn default_events_dir() -> PathBuf {
    PathBuf::from("data/events")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            events_dir: default_events_dir(),
            output_dir: default_output_dir(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "Starting mart builder v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;
    info!(
        catalog_dir = %config.catalog_dir.display(),
        events_dir = %config.events_dir.display(),
        output_dir = %config.output_dir.display(),
        "Loaded configuration"
    );

    let store = ParquetStore::new(&config.output_dir);

    // The event-log scan overlaps the catalog stage; write order is
    // unchanged (catalog relations first).
    let events_dir = config.events_dir.clone();
    let events_handle = tokio::task::spawn_blocking(move || source::read_events(&events_dir));

    let catalog_store = store.clone();
    let catalog_dir = config.catalog_dir.clone();
    let catalog_handle =
        tokio::task::spawn_blocking(move || -> mart_core::Result<CatalogSummary> {
            let records = source::read_catalog(&catalog_dir)?;
            run_catalog_pipeline(&records, &catalog_store)
        });

    let catalog_summary = catalog_handle
        .await
        .context("Catalog stage panicked")?
        .context("Catalog pipeline failed")?;

    let events = events_handle
        .await
        .context("Event scan panicked")?
        .context("Failed to read usage events")?;

    // The fact join re-reads the catalog instead of reusing the first
    // stage's records: it must see the full record set no matter how the
    // stages are reordered or rescoped.
    let catalog = source::read_catalog(&config.catalog_dir)
        .context("Failed to re-read catalog records")?;
    let events_summary =
        run_events_pipeline(&events, &catalog, &store).context("Event pipeline failed")?;

    info!(
        works = catalog_summary.works_rows,
        creators = catalog_summary.creators_rows,
        users = events_summary.users_rows,
        time = events_summary.time_rows,
        facts = events_summary.fact_rows,
        unmatched_facts = events_summary.unmatched_facts,
        "Run complete"
    );

    let snapshot = metrics().snapshot();
    info!(
        rows_written = snapshot.rows_written,
        files_written = snapshot.files_written,
        source_read_latency_mean_ms = snapshot.source_read_latency_mean_ms,
        write_latency_mean_ms = snapshot.write_latency_mean_ms,
        "Run metrics"
    );

    Ok(())
}

/// Load configuration from files and environment.
///
/// Credentials or paths never land in process-global state; the resolved
/// Config value is handed to constructors explicitly.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables (MART_CATALOG_DIR, ...)
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("MART")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    Ok(config)
}

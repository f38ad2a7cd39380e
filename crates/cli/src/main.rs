use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_sync_core::{
    create_pacer, load_config, validate_config, CatalogStore, EnrichmentFunctionClient,
    PlacementResolver, PostgrestCatalog, SanitizedConfig, SyncOrchestrator, SyncOutcome,
    TitleNormalizer,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("catalog-sync {}", VERSION);

    // Determine config path
    let config_path = std::env::var("CATALOG_SYNC_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config)?;

    info!("Configuration loaded successfully");
    info!("{:?}", SanitizedConfig::from(&config));

    let catalog: Arc<dyn CatalogStore> = Arc::new(
        PostgrestCatalog::new(&config.catalog).context("Failed to create catalog client")?,
    );

    let resolver: Arc<dyn PlacementResolver> = Arc::new(
        EnrichmentFunctionClient::new(
            &config.enrichment,
            &config.catalog.base_url,
            &config.catalog.service_key,
        )
        .context("Failed to create enrichment client")?,
    );
    info!(
        "Enrichment endpoint: {}",
        config.enrichment.endpoint_url(&config.catalog.base_url)
    );

    let normalizer =
        TitleNormalizer::new(&config.normalizer).context("Failed to build title normalizer")?;

    let pacer = create_pacer(&config.sync);

    let orchestrator =
        SyncOrchestrator::new(config.sync.clone(), catalog, resolver, normalizer, pacer);

    let outcome = orchestrator.run().await.context("Sync run failed")?;

    report(&outcome);

    Ok(())
}

fn report(outcome: &SyncOutcome) {
    info!("{}", outcome.summary());

    for rename in &outcome.updates {
        info!(
            "Renamed {} ({}): '{}' -> '{}'",
            rename.id, rename.external_id, rename.old_name, rename.new_name
        );
    }
    if outcome.counts.updated > outcome.updates.len() {
        info!(
            "... and {} more renames",
            outcome.counts.updated - outcome.updates.len()
        );
    }

    for failure in &outcome.errors {
        warn!(
            "Failed {} ({}) during {:?}: {}",
            failure.id, failure.external_id, failure.stage, failure.message
        );
    }
    if outcome.counts.errored > outcome.errors.len() {
        warn!(
            "... and {} more failures",
            outcome.counts.errored - outcome.errors.len()
        );
    }

    let elapsed = outcome.finished_at - outcome.started_at;
    info!("Run took {}s", elapsed.num_seconds());
}

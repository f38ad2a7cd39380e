pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod normalizer;
pub mod sync;
pub mod testing;

pub use catalog::{CatalogError, CatalogStore, PostgrestCatalog, ProductRecord, RecordId};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    EnrichmentConfig, SanitizedConfig,
};
pub use enrichment::{EnrichmentError, EnrichmentFunctionClient, Placement, PlacementResolver};
pub use normalizer::{
    extract_slug, BrandRule, BrandTable, NormalizerConfig, NormalizerError, TitleNormalizer,
};
pub use sync::{
    create_pacer, FixedDelay, MinIntervalGate, Pacer, PacingMode, ProgressCallback,
    ProgressSnapshot, RecordOutcome, RenameRecord, SyncConfig, SyncCounts, SyncError,
    SyncErrorRecord, SyncOrchestrator, SyncOutcome, SyncStage,
};

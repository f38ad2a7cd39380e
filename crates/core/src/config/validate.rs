use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Store URL, service key and company id are non-empty
/// - Page size and progress interval are not 0
/// - Brand prefix is non-empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.catalog.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.base_url cannot be empty".to_string(),
        ));
    }

    if config.catalog.service_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "catalog.service_key cannot be empty".to_string(),
        ));
    }

    if config.catalog.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.page_size cannot be 0".to_string(),
        ));
    }

    if config.enrichment.company_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "enrichment.company_id cannot be empty".to_string(),
        ));
    }

    if config.sync.progress_interval == 0 {
        return Err(ConfigError::ValidationError(
            "sync.progress_interval cannot be 0".to_string(),
        ));
    }

    if config.sync.brand_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "sync.brand_prefix cannot be empty".to_string(),
        ));
    }

    Ok(())
}

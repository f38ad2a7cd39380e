use serde::{Deserialize, Deserializer, Serialize};

use crate::normalizer::NormalizerConfig;
use crate::sync::{PacingMode, SyncConfig};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// Catalog store (PostgREST) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Store base URL (e.g., "https://abc.supabase.co")
    pub base_url: String,
    /// Service key, sent both as `apikey` and as bearer token
    #[serde(deserialize_with = "string_or_number")]
    pub service_key: String,
    /// Collection holding the product records
    #[serde(default = "default_table")]
    pub table: String,
    /// Column holding the display name
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// Column holding the marketplace product code
    #[serde(default = "default_external_id_column")]
    pub external_id_column: String,
    /// Rows requested per page (default: 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_catalog_timeout")]
    pub timeout_secs: u32,
}

fn default_table() -> String {
    "products".to_string()
}

fn default_name_column() -> String {
    "name".to_string()
}

fn default_external_id_column() -> String {
    "ean".to_string()
}

fn default_page_size() -> u32 {
    1000
}

fn default_catalog_timeout() -> u32 {
    30
}

/// Enrichment backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    /// Tenant the marketplace credentials belong to
    #[serde(deserialize_with = "string_or_number")]
    pub company_id: String,
    /// Name of the backend function serving `enrichProduct`
    #[serde(default = "default_function_name")]
    pub function_name: String,
    /// Full endpoint URL; derived from `catalog.base_url` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_enrichment_timeout")]
    pub timeout_secs: u32,
}

/// Environment overrides arrive untyped, so an all-digit value is read as
/// a number; identifiers keep it as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
    })
}

fn default_function_name() -> String {
    "bolcom-api".to_string()
}

fn default_enrichment_timeout() -> u32 {
    60
}

impl EnrichmentConfig {
    /// Resolve the endpoint URL against the store base URL.
    pub fn endpoint_url(&self, base_url: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!(
                "{}/functions/v1/{}",
                base_url.trim_end_matches('/'),
                self.function_name
            ),
        }
    }
}

/// Sanitized config for startup logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: SanitizedCatalogConfig,
    pub enrichment: EnrichmentConfig,
    pub sync: SanitizedSyncConfig,
    pub brand_rules: usize,
}

/// Sanitized catalog config (service key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCatalogConfig {
    pub base_url: String,
    pub service_key_configured: bool,
    pub table: String,
    pub page_size: u32,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSyncConfig {
    pub delay_ms: u64,
    pub pacing: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub brand_prefix: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: SanitizedCatalogConfig {
                base_url: config.catalog.base_url.clone(),
                service_key_configured: !config.catalog.service_key.is_empty(),
                table: config.catalog.table.clone(),
                page_size: config.catalog.page_size,
                timeout_secs: config.catalog.timeout_secs,
            },
            enrichment: config.enrichment.clone(),
            sync: SanitizedSyncConfig {
                delay_ms: config.sync.delay_ms,
                pacing: match config.sync.pacing {
                    PacingMode::Fixed => "fixed".to_string(),
                    PacingMode::MinInterval => "min_interval".to_string(),
                },
                dry_run: config.sync.dry_run,
                limit: config.sync.limit,
                brand_prefix: config.sync.brand_prefix.clone(),
            },
            brand_rules: config.normalizer.brands.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[catalog]
base_url = "https://store.example.com"
service_key = "secret"

[enrichment]
company_id = "company-1"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.table, "products");
        assert_eq!(config.catalog.name_column, "name");
        assert_eq!(config.catalog.external_id_column, "ean");
        assert_eq!(config.catalog.page_size, 1000);
        assert_eq!(config.enrichment.function_name, "bolcom-api");
        assert!(config.enrichment.endpoint.is_none());
        assert_eq!(config.sync.brand_prefix, "YO&NO");
        assert_eq!(config.normalizer.brands.len(), 2);
    }

    #[test]
    fn test_numeric_identifiers_are_kept_as_text() {
        let toml = r#"
[catalog]
base_url = "https://store.example.com"
service_key = 998877

[enrichment]
company_id = 12345
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.service_key, "998877");
        assert_eq!(config.enrichment.company_id, "12345");
    }

    #[test]
    fn test_deserialize_missing_enrichment_fails() {
        let toml = r#"
[catalog]
base_url = "https://store.example.com"
service_key = "secret"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_brand_rules() {
        let toml = r#"
[catalog]
base_url = "https://store.example.com"
service_key = "secret"

[enrichment]
company_id = "company-1"

[[normalizer.brands]]
pattern = "la vie"
canonical = "LaVie"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.normalizer.brands.len(), 1);
        assert_eq!(config.normalizer.brands[0].pattern, "la vie");
        assert_eq!(config.normalizer.brands[0].canonical, "LaVie");
    }

    #[test]
    fn test_endpoint_url_derived_from_base() {
        let enrichment = EnrichmentConfig {
            company_id: "c".to_string(),
            function_name: "bolcom-api".to_string(),
            endpoint: None,
            timeout_secs: 60,
        };
        assert_eq!(
            enrichment.endpoint_url("https://abc.supabase.co/"),
            "https://abc.supabase.co/functions/v1/bolcom-api"
        );

        let overridden = EnrichmentConfig {
            endpoint: Some("http://localhost:9000/enrich".to_string()),
            ..enrichment
        };
        assert_eq!(
            overridden.endpoint_url("https://abc.supabase.co"),
            "http://localhost:9000/enrich"
        );
    }

    #[test]
    fn test_sanitized_config_hides_key() {
        let toml = r#"
[catalog]
base_url = "https://store.example.com"
service_key = "super-secret"

[enrichment]
company_id = "company-1"

[sync]
pacing = "min_interval"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.catalog.service_key_configured);
        assert_eq!(sanitized.sync.pacing, "min_interval");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }
}

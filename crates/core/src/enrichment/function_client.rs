//! Client for the marketplace enrichment backend function.
//!
//! The backend exposes a single RPC-style endpoint that dispatches on an
//! `action` field. Only `enrichProduct` is used here, and only the
//! `placement.url` part of its answer matters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::Placement;
use super::{EnrichmentError, PlacementResolver};
use crate::config::EnrichmentConfig;

const ENRICH_ACTION: &str = "enrichProduct";

/// Enrichment backend client.
pub struct EnrichmentFunctionClient {
    client: Client,
    endpoint: String,
    service_key: String,
    company_id: String,
}

impl EnrichmentFunctionClient {
    /// Create a new client.
    ///
    /// `base_url` and `service_key` are the catalog store's; the backend
    /// function is hosted next to it unless an explicit endpoint is set.
    pub fn new(
        config: &EnrichmentConfig,
        base_url: &str,
        service_key: &str,
    ) -> Result<Self, EnrichmentError> {
        if config.company_id.is_empty() {
            return Err(EnrichmentError::NotConfigured(
                "enrichment company id is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint_url(base_url),
            service_key: service_key.to_string(),
            company_id: config.company_id.clone(),
        })
    }
}

#[async_trait]
impl PlacementResolver for EnrichmentFunctionClient {
    async fn resolve_placement(&self, external_id: &str) -> Result<Placement, EnrichmentError> {
        debug!("Enrichment request: ean={}", external_id);

        let request = EnrichRequest {
            action: ENRICH_ACTION,
            company_id: &self.company_id,
            ean: external_id,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == 401 || status == 403 {
            return Err(EnrichmentError::NotConfigured(
                "enrichment backend rejected the service key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<EnrichResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(EnrichmentError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: EnrichResponse = response.json().await.map_err(|e| {
            EnrichmentError::ParseError(format!("Failed to parse enrichment response: {}", e))
        })?;

        envelope.into_placement(external_id)
    }
}

// ============================================================================
// Wire Types (private)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnrichRequest<'a> {
    action: &'a str,
    company_id: &'a str,
    ean: &'a str,
}

#[derive(Debug, Deserialize)]
struct EnrichResponse {
    success: bool,
    #[serde(default)]
    data: Option<EnrichData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichData {
    #[serde(default)]
    placement: Option<PlacementDto>,
    #[serde(default)]
    placement_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlacementDto {
    #[serde(default)]
    url: Option<String>,
}

impl EnrichResponse {
    fn into_placement(self, external_id: &str) -> Result<Placement, EnrichmentError> {
        if !self.success {
            return Err(EnrichmentError::Rejected(
                self.error
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }

        let Some(data) = self.data else {
            return Ok(Placement::unlisted());
        };

        // The backend folds marketplace lookup failures (including "no such
        // product") into `placementError`; those are resolution misses.
        if let Some(reason) = data.placement_error {
            debug!("No placement for ean={}: {}", external_id, reason);
        }

        Ok(Placement {
            url: data.placement.and_then(|p| p.url),
        })
    }
}

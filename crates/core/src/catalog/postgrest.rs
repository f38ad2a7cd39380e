//! PostgREST catalog client.
//!
//! Talks to the `/rest/v1/<table>` endpoint of a PostgREST-compatible store
//! (e.g. Supabase). Authentication uses the service key both as the
//! `apikey` header and as a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{ProductRecord, RecordId};
use super::{CatalogError, CatalogStore};
use crate::config::CatalogConfig;

/// PostgREST catalog client.
pub struct PostgrestCatalog {
    client: Client,
    table_url: String,
    service_key: String,
    name_column: String,
    external_id_column: String,
    page_size: u32,
}

impl PostgrestCatalog {
    /// Create a new client from the catalog configuration.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        if config.service_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "catalog service key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let table_url = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            urlencoding::encode(&config.table)
        );

        Ok(Self {
            client,
            table_url,
            service_key: config.service_key.clone(),
            name_column: config.name_column.clone(),
            external_id_column: config.external_id_column.clone(),
            page_size: config.page_size.max(1),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Column list with aliases so rows decode into `ProductRecord` whatever
    /// the store calls its columns.
    fn select_clause(&self) -> String {
        format!(
            "id,name:{},external_id:{}",
            self.name_column, self.external_id_column
        )
    }

    async fn fetch_page(&self, offset: u64) -> Result<Vec<ProductRecord>, CatalogError> {
        debug!(
            "Catalog fetch: table_url='{}', offset={}, limit={}",
            self.table_url, offset, self.page_size
        );

        let select = self.select_clause();
        let offset = offset.to_string();
        let limit = self.page_size.to_string();

        let request = self.client.get(&self.table_url).query(&[
            ("select", select.as_str()),
            (self.external_id_column.as_str(), "not.is.null"),
            (self.external_id_column.as_str(), "neq."),
            ("offset", offset.as_str()),
            ("limit", limit.as_str()),
        ]);

        let response = check_status(self.authorized(request).send().await?, &self.table_url).await?;

        let rows: Vec<ProductRecord> = response.json().await.map_err(|e| {
            CatalogError::ParseError(format!("Failed to parse catalog page: {}", e))
        })?;

        Ok(rows)
    }
}

#[async_trait]
impl CatalogStore for PostgrestCatalog {
    async fn fetch_candidates(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        let mut records = Vec::new();
        let mut offset = 0u64;

        loop {
            let page = self.fetch_page(offset).await?;
            let page_len = page.len();
            offset += page_len as u64;

            records.extend(page.into_iter().filter(|r| r.external_id().is_some()));

            if page_len < self.page_size as usize {
                break;
            }
        }

        debug!("Catalog fetch complete: {} records", records.len());
        Ok(records)
    }

    async fn rename(&self, id: &RecordId, new_name: &str) -> Result<(), CatalogError> {
        debug!("Catalog rename: id={}, name='{}'", id, new_name);

        let mut body = serde_json::Map::new();
        body.insert(
            self.name_column.clone(),
            serde_json::Value::String(new_name.to_string()),
        );

        let request = self
            .client
            .patch(&self.table_url)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal, count=exact")
            .json(&body);

        let response = check_status(self.authorized(request).send().await?, id.as_str()).await?;

        // With `count=exact` the store reports how many rows the filter hit.
        let matched = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total);

        if matched == Some(0) {
            warn!("Catalog rename matched no rows: id={}", id);
            return Err(CatalogError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

async fn check_status(response: Response, subject: &str) -> Result<Response, CatalogError> {
    let status = response.status();
    if status == 401 || status == 403 {
        return Err(CatalogError::NotConfigured(
            "catalog store rejected the service key".to_string(),
        ));
    }
    if status == 404 {
        return Err(CatalogError::NotFound(subject.to_string()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(CatalogError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

/// Total from a `Content-Range` value such as `0-24/3573` or `*/0`.
fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}

/// PostgREST error body; only the message is surfaced.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

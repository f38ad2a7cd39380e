//! Mock placement resolver for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::enrichment::{EnrichmentError, Placement, PlacementResolver};

/// Mock implementation of the PlacementResolver trait.
///
/// Unknown product codes resolve to an unlisted placement.
#[derive(Debug, Default)]
pub struct MockPlacementResolver {
    /// Placement URL by product code.
    urls: Arc<RwLock<HashMap<String, String>>>,
    /// Product codes whose resolution fails.
    failing: Arc<RwLock<HashSet<String>>>,
    /// Product codes queried, in order.
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockPlacementResolver {
    /// Create a new empty mock resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placement URL for a product code.
    pub async fn set_url(&self, external_id: &str, url: impl Into<String>) {
        self.urls
            .write()
            .await
            .insert(external_id.to_string(), url.into());
    }

    /// Make resolution of this product code fail.
    pub async fn fail(&self, external_id: &str) {
        self.failing.write().await.insert(external_id.to_string());
    }

    /// Product codes queried so far.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.read().await.clone()
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[async_trait]
impl PlacementResolver for MockPlacementResolver {
    async fn resolve_placement(&self, external_id: &str) -> Result<Placement, EnrichmentError> {
        self.queries.write().await.push(external_id.to_string());

        if self.failing.read().await.contains(external_id) {
            return Err(EnrichmentError::ApiError {
                status: 502,
                message: "simulated transport failure".to_string(),
            });
        }

        Ok(self
            .urls
            .read()
            .await
            .get(external_id)
            .map(|url| Placement::listed(url.clone()))
            .unwrap_or_else(Placement::unlisted))
    }
}

//! Marketplace enrichment.
//!
//! Resolves a marketplace product code to the placement the marketplace
//! currently associates with it. "No listing" is a normal answer (a
//! placement without URL); only transport and protocol faults are errors.

mod function_client;
mod types;

pub use function_client::EnrichmentFunctionClient;
pub use types::Placement;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when resolving a placement.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Backend returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Backend answered but reported failure.
    #[error("Enrichment rejected: {0}")]
    Rejected(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Resolves marketplace product codes to placements.
#[async_trait]
pub trait PlacementResolver: Send + Sync {
    /// Resolve the placement for a product code, uncached.
    async fn resolve_placement(&self, external_id: &str) -> Result<Placement, EnrichmentError>;
}

//! Catalog store access.
//!
//! The store holds the product records whose display names get replaced.
//! Only two operations are needed: a full paged read of every record that
//! carries a marketplace product code, and a single-field rename.

mod postgrest;
mod types;

pub use postgrest::PostgrestCatalog;
pub use types::{ProductRecord, RecordId};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Record or collection not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured or credentials rejected.
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// Read/write access to the product collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every record with a non-empty external identifier.
    ///
    /// Pages through the whole collection; callers never see a page limit.
    async fn fetch_candidates(&self) -> Result<Vec<ProductRecord>, CatalogError>;

    /// Replace the display name of a single record.
    async fn rename(&self, id: &RecordId, new_name: &str) -> Result<(), CatalogError>;
}

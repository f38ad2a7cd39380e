//! Testing utilities and mock implementations.
//!
//! Mocks for every external collaborator of the sync run, so the whole
//! pipeline can be exercised without a store or marketplace backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_sync_core::testing::{fixtures, MockCatalogStore, MockPlacementResolver};
//!
//! let catalog = MockCatalogStore::new();
//! catalog.add_record(fixtures::placeholder_record("1", "8720165430012")).await;
//!
//! let resolver = MockPlacementResolver::new();
//! resolver.set_url("8720165430012", fixtures::product_url("yo-no-oorbellen-0-8-mm")).await;
//! ```

mod mock_catalog;
mod mock_pacer;
mod mock_resolver;

pub use mock_catalog::{MockCatalogStore, RecordedCatalogCall};
pub use mock_pacer::MockPacer;
pub use mock_resolver::MockPlacementResolver;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{ProductRecord, RecordId};

    /// Create a record with the given name.
    pub fn record(id: &str, name: &str, external_id: &str) -> ProductRecord {
        ProductRecord {
            id: RecordId::new(id),
            name: name.to_string(),
            external_id: Some(external_id.to_string()),
        }
    }

    /// Create a record with a generated `YO&NO - <code>` name.
    pub fn placeholder_record(id: &str, external_id: &str) -> ProductRecord {
        record(id, &format!("YO&NO - {}", external_id), external_id)
    }

    /// Marketplace product page URL for a slug.
    pub fn product_url(slug: &str) -> String {
        format!("https://www.bol.com/nl/nl/p/{}/9300000{}/", slug, slug.len())
    }
}

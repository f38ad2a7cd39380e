//! Placement types.

use serde::{Deserialize, Serialize};

/// The marketplace's resolution of a product code to its canonical page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Canonical product page URL, absent when there is no listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Placement {
    /// A placement with a URL.
    pub fn listed(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// A placement for a product the marketplace does not list.
    pub fn unlisted() -> Self {
        Self::default()
    }

    /// The URL, ignoring blank values.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

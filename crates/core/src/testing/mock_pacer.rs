//! Mock pacer for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::sync::Pacer;

/// Pacer that never waits and counts how often it was asked to.
#[derive(Debug, Clone, Default)]
pub struct MockPacer {
    calls: Arc<AtomicUsize>,
}

impl MockPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `pace` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for MockPacer {
    async fn pace(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

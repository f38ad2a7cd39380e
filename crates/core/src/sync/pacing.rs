//! Pacing between outbound calls.
//!
//! The orchestrator calls [`Pacer::pace`] once after every processed
//! record, whatever the outcome. Implementations decide how long to wait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

use super::config::{PacingMode, SyncConfig};

/// Waits between records.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}

/// Unconditional pause of a fixed length.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pace(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Minimum interval between successive passes.
///
/// Only the remainder of the interval is slept, so slow calls are not
/// penalized twice.
#[derive(Debug, Clone)]
pub struct MinIntervalGate {
    interval: Duration,
    last_pass: Arc<Mutex<Option<Instant>>>,
}

impl MinIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_pass: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl Pacer for MinIntervalGate {
    async fn pace(&self) {
        let mut last = self.last_pass.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.interval {
                let wait_time = self.interval - elapsed;
                debug!("Pacing: waiting {:?}", wait_time);
                sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Build the pacer selected by the configuration.
pub fn create_pacer(config: &SyncConfig) -> Arc<dyn Pacer> {
    let delay = Duration::from_millis(config.delay_ms);
    match config.pacing {
        PacingMode::Fixed => Arc::new(FixedDelay::new(delay)),
        PacingMode::MinInterval => Arc::new(MinIntervalGate::new(delay)),
    }
}

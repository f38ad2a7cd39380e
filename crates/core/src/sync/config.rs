//! Sync run configuration.

use serde::{Deserialize, Serialize};

/// How outbound calls are paced between records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// Sleep the full delay after every record.
    #[default]
    Fixed,
    /// Sleep only what is left of the delay since the previous record.
    MinInterval,
}

/// Configuration for a sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Pause between records (milliseconds).
    #[serde(default = "default_delay")]
    pub delay_ms: u64,

    /// Pacing strategy for `delay_ms`.
    #[serde(default)]
    pub pacing: PacingMode,

    /// Emit a progress snapshot every this many processed records.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// How many renames are kept in the outcome log.
    #[serde(default = "default_max_logged_updates")]
    pub max_logged_updates: usize,

    /// How many errors are kept in the outcome log.
    #[serde(default = "default_max_logged_errors")]
    pub max_logged_errors: usize,

    /// Brand token that prefixes generated placeholder names.
    #[serde(default = "default_brand_prefix")]
    pub brand_prefix: String,

    /// Placeholders of the `<brand> - <token>` form must be shorter than this.
    #[serde(default = "default_max_placeholder_len")]
    pub max_placeholder_len: usize,

    /// Compute renames without writing them.
    #[serde(default)]
    pub dry_run: bool,

    /// Stop after this many eligible records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

fn default_delay() -> u64 {
    300
}

fn default_progress_interval() -> usize {
    25
}

fn default_max_logged_updates() -> usize {
    20
}

fn default_max_logged_errors() -> usize {
    10
}

fn default_brand_prefix() -> String {
    "YO&NO".to_string()
}

fn default_max_placeholder_len() -> usize {
    30
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay(),
            pacing: PacingMode::default(),
            progress_interval: default_progress_interval(),
            max_logged_updates: default_max_logged_updates(),
            max_logged_errors: default_max_logged_errors(),
            brand_prefix: default_brand_prefix(),
            max_placeholder_len: default_max_placeholder_len(),
            dry_run: false,
            limit: None,
        }
    }
}

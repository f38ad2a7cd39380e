//! Types for sync runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CatalogError, RecordId};

/// Errors that abort a sync run.
///
/// Per-record failures never end up here; they are counted in the outcome.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Loading the candidate list failed.
    #[error("failed to load candidates: {0}")]
    Fetch(#[from] CatalogError),
}

/// Outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    /// Records renamed (or that would be, in a dry run).
    pub updated: usize,
    /// Records the marketplace has no URL for.
    pub not_resolvable: usize,
    /// Records whose derived title is unusable or already in place.
    pub already_correct: usize,
    /// Records that hit a transport or write fault.
    pub errored: usize,
}

impl SyncCounts {
    /// Records that reached a terminal outcome.
    pub fn processed(&self) -> usize {
        self.updated + self.not_resolvable + self.already_correct + self.errored
    }
}

/// Where a per-record failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    Resolve,
    Rename,
}

/// A logged rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRecord {
    pub id: RecordId,
    pub external_id: String,
    pub old_name: String,
    pub new_name: String,
}

/// A logged per-record failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncErrorRecord {
    pub id: RecordId,
    pub external_id: String,
    pub stage: SyncStage,
    pub message: String,
}

/// Running counters handed to progress listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Eligible records processed so far.
    pub processed: usize,
    /// Eligible records in this run.
    pub eligible: usize,
    pub counts: SyncCounts,
}

/// Aggregate result of one sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub counts: SyncCounts,
    /// Records returned by the store.
    pub fetched: usize,
    /// Records that passed the placeholder filter.
    pub eligible: usize,
    /// First renames, capped.
    pub updates: Vec<RenameRecord>,
    /// First failures, capped.
    pub errors: Vec<SyncErrorRecord>,
    /// Whether renames were skipped.
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncOutcome {
    pub(crate) fn new(dry_run: bool) -> Self {
        let now = Utc::now();
        Self {
            counts: SyncCounts::default(),
            fetched: 0,
            eligible: 0,
            updates: Vec::new(),
            errors: Vec::new(),
            dry_run,
            started_at: now,
            finished_at: now,
        }
    }

    /// Count a rename, logging it while under `cap`.
    pub(crate) fn record_update(&mut self, rename: RenameRecord, cap: usize) {
        self.counts.updated += 1;
        if self.updates.len() < cap {
            self.updates.push(rename);
        }
    }

    /// Count a failure, logging it while under `cap`.
    pub(crate) fn record_error(&mut self, error: SyncErrorRecord, cap: usize) {
        self.counts.errored += 1;
        if self.errors.len() < cap {
            self.errors.push(error);
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.counts.processed(),
            eligible: self.eligible,
            counts: self.counts,
        }
    }

    /// One-line tally.
    pub fn summary(&self) -> String {
        format!(
            "{}updated={} not_resolvable={} already_correct={} errored={} (eligible {} of {} fetched)",
            if self.dry_run { "[dry run] " } else { "" },
            self.counts.updated,
            self.counts.not_resolvable,
            self.counts.already_correct,
            self.counts.errored,
            self.eligible,
            self.fetched
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_record(n: usize) -> SyncErrorRecord {
        SyncErrorRecord {
            id: RecordId::new(n.to_string()),
            external_id: format!("871{}", n),
            stage: SyncStage::Resolve,
            message: "timeout".to_string(),
        }
    }

    #[test]
    fn test_error_log_is_capped_but_counted() {
        let mut outcome = SyncOutcome::new(false);
        for n in 0..5 {
            outcome.record_error(error_record(n), 2);
        }
        assert_eq!(outcome.counts.errored, 5);
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors[1].id.as_str(), "1");
    }

    #[test]
    fn test_update_log_is_capped_but_counted() {
        let mut outcome = SyncOutcome::new(false);
        for n in 0..3 {
            outcome.record_update(
                RenameRecord {
                    id: RecordId::new(n.to_string()),
                    external_id: "871".to_string(),
                    old_name: "YO&NO - 1".to_string(),
                    new_name: "YO&NO Ring".to_string(),
                },
                0,
            );
        }
        assert_eq!(outcome.counts.updated, 3);
        assert!(outcome.updates.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut outcome = SyncOutcome::new(true);
        outcome.fetched = 10;
        outcome.eligible = 4;
        outcome.counts = SyncCounts {
            updated: 1,
            not_resolvable: 1,
            already_correct: 1,
            errored: 1,
        };
        assert_eq!(
            outcome.summary(),
            "[dry run] updated=1 not_resolvable=1 already_correct=1 errored=1 (eligible 4 of 10 fetched)"
        );
        assert_eq!(outcome.snapshot().processed, 4);
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&error_record(1)).unwrap();
        assert!(json.contains(r#""stage":"resolve""#));
    }
}

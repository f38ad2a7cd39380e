//! Sync orchestrator implementation.
//!
//! One sequential pass over the store:
//! - fetch every record with a product code (a failure here aborts the run)
//! - keep the ones whose name is a generated placeholder
//! - per record: resolve placement, derive title, rename if it differs
//! - pace after every record, whatever happened

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogStore, ProductRecord};
use crate::enrichment::PlacementResolver;
use crate::normalizer::TitleNormalizer;

use super::config::SyncConfig;
use super::eligibility::EligibilityFilter;
use super::pacing::Pacer;
use super::types::{
    ProgressSnapshot, RenameRecord, SyncError, SyncErrorRecord, SyncOutcome, SyncStage,
};

/// Callback invoked with running counters every `progress_interval` records.
pub type ProgressCallback = Arc<dyn Fn(ProgressSnapshot) + Send + Sync>;

/// What happened to a single eligible record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Updated(RenameRecord),
    NotResolvable,
    AlreadyCorrect,
    Errored(SyncErrorRecord),
}

/// Drives one sync run over the catalog.
pub struct SyncOrchestrator {
    config: SyncConfig,
    catalog: Arc<dyn CatalogStore>,
    resolver: Arc<dyn PlacementResolver>,
    normalizer: TitleNormalizer,
    filter: EligibilityFilter,
    pacer: Arc<dyn Pacer>,
    on_progress: Option<ProgressCallback>,
}

impl SyncOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: SyncConfig,
        catalog: Arc<dyn CatalogStore>,
        resolver: Arc<dyn PlacementResolver>,
        normalizer: TitleNormalizer,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        let filter = EligibilityFilter::from_config(&config);

        Self {
            config,
            catalog,
            resolver,
            normalizer,
            filter,
            pacer,
            on_progress: None,
        }
    }

    /// Receive progress snapshots in addition to the log lines.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Run a full pass.
    ///
    /// Only a failure to load the candidate list is returned as an error.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        let mut outcome = SyncOutcome::new(self.config.dry_run);

        info!("Loading catalog records");
        let records = self.catalog.fetch_candidates().await?;
        outcome.fetched = records.len();

        let mut eligible: Vec<ProductRecord> = records
            .into_iter()
            .filter(|r| r.external_id().is_some() && self.filter.is_eligible(&r.name))
            .collect();

        if let Some(limit) = self.config.limit {
            eligible.truncate(limit);
        }
        outcome.eligible = eligible.len();

        info!(
            "{} of {} records have placeholder names{}",
            outcome.eligible,
            outcome.fetched,
            if self.config.dry_run { " (dry run)" } else { "" }
        );

        let interval = self.config.progress_interval.max(1);

        for (index, record) in eligible.iter().enumerate() {
            match self.process_record(record).await {
                RecordOutcome::Updated(rename) => {
                    outcome.record_update(rename, self.config.max_logged_updates)
                }
                RecordOutcome::NotResolvable => outcome.counts.not_resolvable += 1,
                RecordOutcome::AlreadyCorrect => outcome.counts.already_correct += 1,
                RecordOutcome::Errored(error) => {
                    outcome.record_error(error, self.config.max_logged_errors)
                }
            }

            self.pacer.pace().await;

            if (index + 1) % interval == 0 {
                self.report_progress(&outcome);
            }
        }

        outcome.finished_at = Utc::now();
        info!("Sync finished: {}", outcome.summary());

        Ok(outcome)
    }

    /// Resolve, normalize and (unless dry run) rename a single record.
    pub async fn process_record(&self, record: &ProductRecord) -> RecordOutcome {
        let Some(external_id) = record.external_id() else {
            return RecordOutcome::NotResolvable;
        };

        let placement = match self.resolver.resolve_placement(external_id).await {
            Ok(placement) => placement,
            Err(e) => {
                warn!("Resolve failed for {} ({}): {}", record.id, external_id, e);
                return RecordOutcome::Errored(SyncErrorRecord {
                    id: record.id.clone(),
                    external_id: external_id.to_string(),
                    stage: SyncStage::Resolve,
                    message: e.to_string(),
                });
            }
        };

        let Some(url) = placement.url() else {
            debug!("No listing for {} ({})", record.id, external_id);
            return RecordOutcome::NotResolvable;
        };

        let title = match self.normalizer.normalize(url) {
            Some(title) if title != record.name => title,
            Some(_) => return RecordOutcome::AlreadyCorrect,
            None => {
                debug!("No title derivable from {}", url);
                return RecordOutcome::AlreadyCorrect;
            }
        };

        if !self.config.dry_run {
            if let Err(e) = self.catalog.rename(&record.id, &title).await {
                warn!("Rename failed for {}: {}", record.id, e);
                return RecordOutcome::Errored(SyncErrorRecord {
                    id: record.id.clone(),
                    external_id: external_id.to_string(),
                    stage: SyncStage::Rename,
                    message: e.to_string(),
                });
            }
        }

        info!("{}: '{}' -> '{}'", record.id, record.name, title);

        RecordOutcome::Updated(RenameRecord {
            id: record.id.clone(),
            external_id: external_id.to_string(),
            old_name: record.name.clone(),
            new_name: title,
        })
    }

    fn report_progress(&self, outcome: &SyncOutcome) {
        let snapshot = outcome.snapshot();
        info!(
            "Progress {}/{}: updated={} not_resolvable={} already_correct={} errored={}",
            snapshot.processed,
            snapshot.eligible,
            snapshot.counts.updated,
            snapshot.counts.not_resolvable,
            snapshot.counts.already_correct,
            snapshot.counts.errored
        );

        if let Some(callback) = &self.on_progress {
            callback(snapshot);
        }
    }
}

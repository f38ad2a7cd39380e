//! Catalog name synchronization.
//!
//! Replaces placeholder product names with titles derived from the
//! marketplace's product page URLs. Runs are sequential and stateless: every
//! run re-derives its work list from the store, so an interrupted run is
//! simply started again.

mod config;
mod eligibility;
mod pacing;
mod runner;
mod types;

pub use config::{PacingMode, SyncConfig};
pub use eligibility::EligibilityFilter;
pub use pacing::{create_pacer, FixedDelay, MinIntervalGate, Pacer};
pub use runner::{ProgressCallback, RecordOutcome, SyncOrchestrator};
pub use types::{
    ProgressSnapshot, RenameRecord, SyncCounts, SyncError, SyncErrorRecord, SyncOutcome,
    SyncStage,
};

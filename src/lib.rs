//! Pswp - a terminal photo triage library
//!
//! This crate provides the core functionality for the Pswp application:
//! a triage engine that walks a batch of photos through keep/delete
//! decisions, plus the batch, deletion and preview collaborators around it.

pub mod async_preview;
pub mod batch;
pub mod cli;
pub mod config;
pub mod deletion;
pub mod domain;
pub mod error;
pub mod file_opener;
pub mod logging;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use batch::{BatchLoader, BatchOrder, BatchProvider, DirectoryBatchProvider};
pub use config::UserConfig;
pub use deletion::{
    DeletionMode, DeletionOutcome, DeletionRequest, DeletionRequester, DeletionWorker, Deleter,
};
pub use domain::{
    discover_photos, Decision, DecisionEntry, DiscoveryOptions, Gesture, PhotoId, PhotoRecord,
    TriageEngine, TriageState, TriageStatistics, TriageSummary,
};
pub use error::{Result, TriageError};
pub use file_opener::open_photo;

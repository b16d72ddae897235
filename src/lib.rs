//! Run Reporter - test-run reporting and aggregation for browser e2e suites.
//!
//! This crate provides:
//! - Normalization of per-test completion events into canonical records
//! - Artifact path rewriting for local and CI execution environments
//! - An append-only in-memory result store with run-end finalization
//! - Dual HTML report rendering (customer and detailed operational views)
//! - Base64 bug payloads for the client-side issue-filing helper
//! - Atomic report persistence to a configured output directory
//!
//! # Example
//!
//! ```rust,no_run
//! use run_reporter::{ReporterConfig, RunReporter, TestEvent};
//!
//! let mut reporter = RunReporter::new(ReporterConfig::from_env());
//! let event: TestEvent = serde_json::from_str(
//!     r#"{"suite":"Home","title":"loads","id":"t-1","outcome":"passed"}"#,
//! ).unwrap();
//! reporter.on_test_end(&event);
//! reporter.on_end().unwrap();
//! ```

pub mod artifact;
pub mod config;
pub mod event;
pub mod normalize;
pub mod report;
pub mod reporter;
pub mod store;

// Re-export configuration
pub use config::{ReporterConfig, TrackerConfig};

// Re-export the inbound event model
pub use event::{Attachment, Failure, Outcome, SubEvent, TestEvent};

// Re-export normalization and path resolution
pub use artifact::ArtifactPathResolver;
pub use normalize::{normalize, strip_ansi};

// Re-export storage and report types
pub use report::{
    AggregateCounts, BugPayload, RenderOptions, ReportError, ReportResult, TestRecord, TestStatus,
    render, write_reports,
};
pub use store::ResultStore;

// Re-export the run facade
pub use reporter::RunReporter;

//! Tabular-file domain classification and report synthesis.
//!
//! Pipeline, one file at a time: decode -> normalize -> classify -> compute
//! statistics -> generate domain sections -> score confidence/quality ->
//! assemble report. Everything is synchronous and per-file isolated: a file
//! that fails to decode becomes an error report, never an aborted batch.

pub mod classify;
pub mod error;
pub mod generators;
pub mod loader;
pub mod output;
pub mod relevance;
pub mod report;
pub mod scoring;
pub mod stats;
pub mod types;
pub mod util;

pub use error::{ReportError, Result};
pub use report::{error_report, generate_report, generate_reports, FileInput};
pub use types::{ColumnStats, DomainTag, QualityLabel, Record, RecordSet, Report};

use thiserror::Error;

/// Failures the pipeline can surface. Per-file decode problems are absorbed
/// into error reports by the assembler; only `EmptyBatch` escapes the batch
/// entry point as a hard error.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("failed to parse file content: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no input files to process")]
    EmptyBatch,
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

//! Error types for the procurement ingestion pipeline.
//!
//! - [`CsvError`] - reading and decoding sheet exports
//! - [`MapError`] - record mapping (only raised when there is no data at all)
//! - [`ExportError`] - writing records back out
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Conversion is automatic via `From`, so `?` works across boundaries.
//! Per-cell coercion problems are never errors: they degrade to defaults.

use thiserror::Error;

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors while reading or decoding a sheet export.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to parse.
    #[error("CSV input is empty")]
    EmptyFile,
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors from the record mapper.
#[derive(Debug, Error)]
pub enum MapError {
    /// Fewer than two rows: no header plus data.
    #[error("No data rows to map (got {rows} row(s), need a header and at least one data row)")]
    EmptyInput { rows: usize },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing records.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline error, returned by [`crate::transform::pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("Mapping error: {0}")]
    Map(#[from] MapError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV input operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for mapping operations.
pub type MapResult<T> = Result<T, MapError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

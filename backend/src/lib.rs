//! # Procurement - sheet ingestion for the procurement dashboard
//!
//! Turns the procurement team's Google Sheet (exported as CSV) into typed
//! records. Sheets are edited by hand, so headers drift, cells span several
//! lines, numbers carry `%` signs, and the number of vendor columns varies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV export │────▶│  Tokenizer  │────▶│   Mapper    │────▶│   Records   │
//! │  (any enc.) │     │ (quote bal.)│     │(fuzzy cols) │     │ (+ summary) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use procurement::{map_records, tokenize};
//!
//! let csv = "Sr. No,Manager,Achieved Savings,Vendor 1\n1,Gaurav,25%,Eaton";
//! let records = map_records(&tokenize(csv)).unwrap();
//!
//! assert_eq!(records[0].manager, "Gaurav");
//! assert_eq!(records[0].achieved_savings, 25.0);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Raw rows, semantic fields, procurement records
//! - [`parser`] - Encoding detection and row tokenizing
//! - [`transform`] - Column resolution, mapping, summary, pipeline
//! - [`export`] - JSON and CSV output
//! - [`config`] - Environment configuration
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod export;

// Ambient
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, ExportError, MapError, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Field, ProcurementRecord, RawRow};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_bytes_auto, decode_content, detect_encoding, detect_secondary_delimiter,
    read_file_auto, tokenize, QuoteBalanceTokenizer, RowTokenizer,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    load_bytes, load_file, load_text, load_text_with, map_records, map_row, resolve_column,
    summarize, vendor_columns, ColumnMap, ColumnReport, CsvInfo, DashboardSummary, ParseOptions,
    PipelineOutput, RecordMapper, FIELD_SEARCH_TERMS,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{write_csv, write_json, write_records, OutputFormat};

pub use config::Config;

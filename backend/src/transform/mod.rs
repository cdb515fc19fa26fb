//! Transformation module.
//!
//! - Columns: fuzzy header resolution and vendor column detection
//! - Coerce: lenient numeric parsing of cells
//! - Mapper: tokenized rows to procurement records
//! - Summary: dashboard aggregates
//! - Pipeline: decode, tokenize and map in one call

pub mod coerce;
pub mod columns;
pub mod mapper;
pub mod pipeline;
pub mod summary;

pub use columns::{resolve_column, vendor_columns, ColumnMap, ColumnReport, FIELD_SEARCH_TERMS};
pub use mapper::{map_records, map_row, RecordMapper};
pub use pipeline::*;
pub use summary::{summarize, DashboardSummary};

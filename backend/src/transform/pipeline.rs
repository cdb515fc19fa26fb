//! High-level API: sheet export in, procurement records out.
//!
//! Combines decoding, tokenizing, column resolution and row mapping, and
//! reports progress through [`crate::logs`].
//!
//! # Example
//!
//! ```rust,ignore
//! use procurement::{load_file, ParseOptions};
//!
//! let output = load_file("sheet.csv", &ParseOptions::default())?;
//! println!("{} records", output.records.len());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning, log_warning_indent};
use crate::models::ProcurementRecord;
use crate::parser::{
    decode_bytes_auto, detect_secondary_delimiter, read_file_auto, DecodedText,
    QuoteBalanceTokenizer, RowTokenizer,
};

use super::columns::ColumnReport;
use super::mapper::{split_header, RecordMapper};

/// Options for one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Extra cell separator besides `,`
    pub secondary_delimiter: Option<char>,

    /// Use `\t` as secondary delimiter when the header line looks tab-separated
    pub detect_tabs: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            secondary_delimiter: None,
            detect_tabs: true,
        }
    }
}

impl ParseOptions {
    fn tokenizer_for(&self, text: &str) -> QuoteBalanceTokenizer {
        let secondary = self.secondary_delimiter.or_else(|| {
            if self.detect_tabs {
                detect_secondary_delimiter(text)
            } else {
                None
            }
        });
        QuoteBalanceTokenizer::new().with_secondary_delimiter(secondary)
    }
}

/// Sheet information gathered while parsing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    pub secondary_delimiter: Option<char>,
    pub headers: Vec<String>,
    /// Data rows after tokenizing (header excluded)
    pub row_count: usize,
    /// Data rows that produced no record
    pub skipped_rows: usize,
}

/// Result of an ingestion run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    pub records: Vec<ProcurementRecord>,
    pub columns: ColumnReport,
    pub csv_info: CsvInfo,
}

/// Parse a sheet file, auto-detecting its encoding.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> PipelineResult<PipelineOutput> {
    log_info(format!("📖 Reading {}", path.as_ref().display()));
    let decoded = read_file_auto(path)?;
    load_decoded(decoded, options)
}

/// Parse raw sheet bytes, auto-detecting their encoding.
pub fn load_bytes(bytes: &[u8], options: &ParseOptions) -> PipelineResult<PipelineOutput> {
    let decoded = decode_bytes_auto(bytes)?;
    load_decoded(decoded, options)
}

/// Parse already-decoded UTF-8 sheet text.
pub fn load_text(text: &str, options: &ParseOptions) -> PipelineResult<PipelineOutput> {
    let tokenizer = options.tokenizer_for(text);
    let mut output = load_text_with(&tokenizer, text)?;
    output.csv_info.secondary_delimiter = tokenizer.secondary_delimiter();
    Ok(output)
}

fn load_decoded(decoded: DecodedText, options: &ParseOptions) -> PipelineResult<PipelineOutput> {
    log_success(format!("Detected encoding: {}", decoded.encoding));
    let mut output = load_text(&decoded.text, options)?;
    output.csv_info.encoding = decoded.encoding;
    Ok(output)
}

/// Parse sheet text with any [`RowTokenizer`].
pub fn load_text_with<T: RowTokenizer + ?Sized>(
    tokenizer: &T,
    text: &str,
) -> PipelineResult<PipelineOutput> {
    let rows = tokenizer.tokenize(text);
    log_success(format!("Read {} logical rows", rows.len()));

    let (header, data) = split_header(&rows)?;

    let mapper = RecordMapper::from_header(header);
    let columns = ColumnReport::new(header, mapper.columns(), mapper.vendor_columns());
    log_column_report(&columns);

    let records: Vec<ProcurementRecord> =
        data.iter().filter_map(|row| mapper.map_row(row)).collect();
    let skipped_rows = data.len() - records.len();

    if skipped_rows > 0 {
        log_warning(format!("Skipped {} row(s) with an empty first cell", skipped_rows));
    }
    log_success(format!("Mapped {} procurement records", records.len()));

    Ok(PipelineOutput {
        records,
        columns,
        csv_info: CsvInfo {
            encoding: "utf-8".to_string(),
            secondary_delimiter: None,
            headers: header.clone(),
            row_count: data.len(),
            skipped_rows,
        },
    })
}

fn log_column_report(report: &ColumnReport) {
    log_info("📋 Column mapping:");
    for resolved in &report.fields {
        match &resolved.header {
            Some(header) => log_info_indent(
                format!("{} → [{}] {}", resolved.field, resolved.index, header),
                1,
            ),
            None => log_warning_indent(format!("{} → unresolved", resolved.field), 1),
        }
    }
    log_info(format!("🏷️  {} vendor column(s)", report.vendor_columns.len()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MapError, PipelineError};
    use crate::logs::LOG_BROADCASTER;

    const SHEET: &str = "Sr. No,Manager,Member,Group Category,No of part codes,Average Spent per Year (INR Lakhs),Target Savings,Achieved Savings,New Vendor-1,New Vendor-2\n\
        1,Gaurav,Maninder,Switchgear,254,175,20%,25%,Eaton,General Electric\n\
        ,stray,row\n\
        2,Gaurav,\"Maninder\nSingh\",Cables,12,40.5,10%,,Polycab,\n";

    fn quiet() {
        LOG_BROADCASTER.set_quiet(true);
    }

    #[test]
    fn test_load_text() {
        quiet();
        let output = load_text(SHEET, &ParseOptions::default()).unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].vendors, vec!["Eaton", "General Electric"]);
        assert_eq!(output.records[1].member, "Maninder\nSingh");
        assert_eq!(output.records[1].achieved_savings, 0.0);
        assert_eq!(output.records[1].vendors, vec!["Polycab"]);

        // The stray row is dropped by the tokenizer, not counted as skipped.
        assert_eq!(output.csv_info.row_count, 2);
        assert_eq!(output.csv_info.skipped_rows, 0);
        assert_eq!(output.csv_info.headers.len(), 10);
        assert_eq!(output.columns.vendor_columns.len(), 2);
    }

    #[test]
    fn test_custom_tokenizer_rows_are_skipped_when_first_cell_empty() {
        quiet();

        struct Fixed;
        impl RowTokenizer for Fixed {
            fn tokenize(&self, _text: &str) -> Vec<crate::models::RawRow> {
                vec![
                    vec!["Sr. No".into(), "Manager".into()],
                    vec!["".into(), "Ghost".into()],
                    vec!["1".into(), "Asha".into()],
                ]
            }
        }

        let output = load_text_with(&Fixed, "").unwrap();
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.csv_info.skipped_rows, 1);
    }

    #[test]
    fn test_header_only_fails() {
        quiet();
        let result = load_text("Sr. No,Manager\n", &ParseOptions::default());
        assert!(matches!(result, Err(PipelineError::Map(MapError::EmptyInput { rows: 1 }))));
    }

    #[test]
    fn test_tab_separated_detected() {
        quiet();
        let text = "Sr. No\tManager\tVendor 1\n1\tAsha\tABB\n";
        let output = load_text(text, &ParseOptions::default()).unwrap();

        assert_eq!(output.csv_info.secondary_delimiter, Some('\t'));
        assert_eq!(output.records[0].manager, "Asha");
        assert_eq!(output.records[0].vendors, vec!["ABB"]);
    }

    #[test]
    fn test_tab_detection_disabled() {
        quiet();
        let options = ParseOptions { secondary_delimiter: None, detect_tabs: false };
        let output = load_text("Sr. No\tManager\n1\tAsha\n", &options).unwrap();

        // One cell per line: both fields resolve to the same column.
        assert_eq!(output.records[0].sr_no, "1\tAsha");
        assert_eq!(output.records[0].manager, "1\tAsha");
    }

    #[test]
    fn test_load_bytes_latin1() {
        quiet();
        let mut bytes = b"Sr. No,Manager\n1,Jos".to_vec();
        bytes.push(0xE9);
        let output = load_bytes(&bytes, &ParseOptions::default()).unwrap();

        assert!(output.records[0].manager.starts_with("Jos"));
    }

    #[test]
    fn test_load_bytes_keeps_utf8_text_intact() {
        quiet();
        let text = "Sr. No,Manager,Average Spent (₹ Lakhs),New Vendor-1\n\
            1,José,175,Tata ₹ Steel\n";
        let output = load_bytes(text.as_bytes(), &ParseOptions::default()).unwrap();

        assert_eq!(output.csv_info.encoding, "utf-8");
        assert_eq!(output.csv_info.headers[2], "Average Spent (₹ Lakhs)");
        assert_eq!(output.records[0].manager, "José");
        assert_eq!(output.records[0].avg_spent, 175.0);
        assert_eq!(output.records[0].vendors, vec!["Tata ₹ Steel"]);
    }

    #[test]
    fn test_load_file() {
        quiet();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        std::fs::write(&path, SHEET).unwrap();

        let output = load_file(&path, &ParseOptions::default()).unwrap();
        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].no_of_part_codes, 254);
    }

    #[test]
    fn test_load_empty_bytes() {
        quiet();
        let result = load_bytes(b"", &ParseOptions::default());
        assert!(matches!(result, Err(PipelineError::Csv(_))));
    }
}

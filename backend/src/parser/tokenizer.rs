//! Quote-aware row tokenizer for spreadsheet CSV exports.
//!
//! Spreadsheet exports put multi-line cell text inside quotes without any
//! other escaping, so a single logical row can span several physical lines.
//! [`QuoteBalanceTokenizer`] stitches physical lines back together by
//! counting quote characters: an odd count means a quoted field is still open.
//!
//! # Limitations
//!
//! The quote-balance rule is a heuristic, not an RFC 4180 state machine.
//! A cell holding an odd number of stray `"` characters outside a proper
//! quoted span desynchronizes every row after it. Sheets exported from the
//! dashboard's source never do this, which is why the rule is kept. Callers
//! go through [`RowTokenizer`] so a stricter tokenizer can be swapped in.

use crate::models::RawRow;

/// Splits CSV text into logical rows of trimmed cells.
pub trait RowTokenizer {
    /// Tokenize `text` into rows. Never fails: malformed quoting is absorbed.
    fn tokenize(&self, text: &str) -> Vec<RawRow>;
}

/// Tokenizer that joins physical lines until quotes balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteBalanceTokenizer {
    /// Extra cell separator honoured outside quotes (e.g. `\t`).
    secondary_delimiter: Option<char>,
}

impl QuoteBalanceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also split cells on `delimiter` (outside quotes).
    pub fn with_secondary_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.secondary_delimiter = delimiter.filter(|&d| d != '"');
        self
    }

    pub fn secondary_delimiter(&self) -> Option<char> {
        self.secondary_delimiter
    }

    /// Scan one logical row into cells.
    ///
    /// `""` inside a quoted span is a literal quote; any other `"` opens or
    /// closes a span and is dropped. Cells are trimmed.
    pub fn scan_row(&self, line: &str) -> RawRow {
        let mut cells = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                c if !in_quotes && self.is_delimiter(c) => {
                    cells.push(current.trim().to_string());
                    current.clear();
                }
                c => current.push(c),
            }
        }
        cells.push(current.trim().to_string());

        cells
    }

    fn is_delimiter(&self, c: char) -> bool {
        c == ',' || Some(c) == self.secondary_delimiter
    }

    fn push_row(&self, rows: &mut Vec<RawRow>, logical: &str) {
        let cells = self.scan_row(logical);
        if cells.first().is_some_and(|first| !first.is_empty()) {
            rows.push(cells);
        }
    }
}

impl RowTokenizer for QuoteBalanceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<RawRow> {
        let mut rows = Vec::new();
        let mut buffer = String::new();
        let mut quotes = 0usize;

        for line in text.split('\n') {
            buffer.push_str(line);
            quotes += line.matches('"').count();

            if quotes % 2 == 1 {
                // Still inside a quoted field: the newline was part of the cell.
                buffer.push('\n');
                continue;
            }

            if !buffer.trim().is_empty() {
                self.push_row(&mut rows, &buffer);
            }
            buffer.clear();
            quotes = 0;
        }

        // Unterminated quote at end of input: keep what is left as one row.
        if !buffer.trim().is_empty() {
            let rest = buffer.strip_suffix('\n').unwrap_or(&buffer);
            self.push_row(&mut rows, rest);
        }

        rows
    }
}

/// Tokenize with the default comma-only tokenizer.
pub fn tokenize(text: &str) -> Vec<RawRow> {
    QuoteBalanceTokenizer::new().tokenize(text)
}

//! Fuzzy header-to-field resolution.
//!
//! Headers in the procurement sheet are typed by hand and drift between
//! exports ("Sr. No", "SNo", "Team Member", "Assignee", ...). Each semantic
//! [`Field`] carries an ordered list of search terms; the first term that is
//! a case-insensitive substring of some header wins, leftmost header first.
//!
//! Term order is load-bearing: the generic `"no"` for `srNo` also matches
//! `"No of part codes"`, so the specific `"sr. no"` must be tried first.

use serde::Serialize;

use crate::models::{Field, RawRow};

/// Search terms per field, most specific first.
pub const FIELD_SEARCH_TERMS: [(Field, &[&str]); 8] = [
    (Field::SrNo, &["sr. no", "sr no", "sno", "no"]),
    (Field::Manager, &["manager"]),
    (Field::Member, &["member", "team member", "assignee"]),
    (Field::GroupCategory, &["group category", "group", "category"]),
    (Field::NoOfPartCodes, &["no of part codes", "part codes", "codes"]),
    (Field::AvgSpent, &["average spent", "avg spent", "average spend"]),
    (Field::TargetSavings, &["target savings", "target"]),
    (Field::AchievedSavings, &["achieved savings", "achieved", "realised"]),
];

/// Substring marking a vendor column.
pub const VENDOR_MARKER: &str = "vendor";

/// Search terms for one field.
pub fn search_terms(field: Field) -> &'static [&'static str] {
    FIELD_SEARCH_TERMS[field.slot()].1
}

/// Find the column for the first term that matches any header.
///
/// Terms are tried in order; for each term headers are scanned left to right.
pub fn resolve_column<S: AsRef<str>>(headers: &[S], terms: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.as_ref().to_lowercase()).collect();

    terms.iter().find_map(|term| {
        let term = term.to_lowercase();
        lowered.iter().position(|header| header.contains(&term))
    })
}

/// Indices of every header containing "vendor", ascending.
pub fn vendor_columns<S: AsRef<str>>(headers: &[S]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| h.as_ref().to_lowercase().contains(VENDOR_MARKER))
        .map(|(i, _)| i)
        .collect()
}

/// Resolved column index per semantic field.
///
/// Built once from the header row and shared read-only across data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    slots: [Option<usize>; 8],
}

impl ColumnMap {
    /// Resolve every field against `headers` using [`FIELD_SEARCH_TERMS`].
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut slots = [None; 8];
        for (field, terms) in FIELD_SEARCH_TERMS {
            slots[field.slot()] = resolve_column(headers, terms);
        }
        Self { slots }
    }

    /// Column index for `field`, `None` when unresolved.
    pub fn get(&self, field: Field) -> Option<usize> {
        self.slots[field.slot()]
    }

    /// Column index, or `-1` when unresolved.
    pub fn index_or_sentinel(&self, field: Field) -> i64 {
        self.get(field).map_or(-1, |i| i as i64)
    }

    /// Fields no header matched.
    pub fn unresolved(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.get(*f).is_none()).collect()
    }

    /// Read the cell for `field` from `row`, if resolved and in bounds.
    pub fn cell<'a>(&self, row: &'a RawRow, field: Field) -> Option<&'a str> {
        self.get(field).and_then(|i| row.get(i)).map(String::as_str)
    }
}

/// Serializable view of a resolution, for CLI and diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReport {
    pub fields: Vec<ResolvedField>,
    pub vendor_columns: Vec<ResolvedColumn>,
}

/// One field and the header it resolved to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    pub field: Field,
    /// Column index, `-1` if unresolved.
    pub index: i64,
    pub header: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColumn {
    pub index: usize,
    pub header: String,
}

impl ColumnReport {
    pub fn new(headers: &RawRow, columns: &ColumnMap, vendors: &[usize]) -> Self {
        let fields = Field::ALL
            .into_iter()
            .map(|field| ResolvedField {
                field,
                index: columns.index_or_sentinel(field),
                header: columns.get(field).and_then(|i| headers.get(i)).cloned(),
            })
            .collect();

        let vendor_columns = vendors
            .iter()
            .filter_map(|&index| {
                headers.get(index).map(|h| ResolvedColumn { index, header: h.clone() })
            })
            .collect();

        Self { fields, vendor_columns }
    }
}

//! Map tokenized rows into [`ProcurementRecord`]s.
//!
//! The first row is the header. It is resolved once into a [`ColumnMap`]
//! and a vendor column list, then every data row is mapped against them.
//! Rows never fail individually: missing or malformed cells take defaults.

use crate::error::{MapError, MapResult};
use crate::models::{Field, ProcurementRecord, RawRow};

use super::coerce::{parse_amount, parse_count, parse_percent};
use super::columns::{vendor_columns, ColumnMap};

/// Column resolution for one sheet, shared across its data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMapper {
    columns: ColumnMap,
    vendor_columns: Vec<usize>,
}

impl RecordMapper {
    /// Resolve fields and vendor columns from the header row.
    pub fn from_header(header: &RawRow) -> Self {
        Self {
            columns: ColumnMap::from_headers(header),
            vendor_columns: vendor_columns(header),
        }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn vendor_columns(&self) -> &[usize] {
        &self.vendor_columns
    }

    /// Map one data row. `None` for rows with no cells or an empty first cell.
    pub fn map_row(&self, row: &RawRow) -> Option<ProcurementRecord> {
        map_row(row, &self.columns, &self.vendor_columns)
    }
}

/// Map one data row against a resolved header.
pub fn map_row(
    row: &RawRow,
    columns: &ColumnMap,
    vendor_columns: &[usize],
) -> Option<ProcurementRecord> {
    if row.first().map_or(true, |first| first.trim().is_empty()) {
        return None;
    }

    let text = |field: Field| columns.cell(row, field).unwrap_or_default().to_string();
    let cell = |field: Field| columns.cell(row, field).unwrap_or_default();

    let vendors = vendor_columns
        .iter()
        .filter_map(|&i| row.get(i))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();

    Some(ProcurementRecord {
        sr_no: text(Field::SrNo),
        manager: text(Field::Manager),
        member: text(Field::Member),
        group_category: text(Field::GroupCategory),
        no_of_part_codes: parse_count(cell(Field::NoOfPartCodes)),
        avg_spent: parse_amount(cell(Field::AvgSpent)),
        target_savings: parse_percent(cell(Field::TargetSavings)),
        achieved_savings: parse_percent(cell(Field::AchievedSavings)),
        vendors,
    })
}

/// Split rows into the header and the data rows below it.
///
/// Fails with [`MapError::EmptyInput`] unless there is at least one data row.
pub fn split_header(rows: &[RawRow]) -> MapResult<(&RawRow, &[RawRow])> {
    match rows {
        [header, data @ ..] if !data.is_empty() => Ok((header, data)),
        _ => Err(MapError::EmptyInput { rows: rows.len() }),
    }
}

/// Map header plus data rows into records.
///
/// Fails only when there is no data row at all.
pub fn map_records(rows: &[RawRow]) -> MapResult<Vec<ProcurementRecord>> {
    let (header, data) = split_header(rows)?;
    let mapper = RecordMapper::from_header(header);
    Ok(data.iter().filter_map(|row| mapper.map_row(row)).collect())
}

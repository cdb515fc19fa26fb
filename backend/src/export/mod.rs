//! Write procurement records out as JSON or flat CSV.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::ExportResult;
use crate::models::{Field, ProcurementRecord};

/// Separator used when vendors are flattened into one CSV cell.
pub const VENDOR_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Pretty-printed JSON array of records.
pub fn write_json<W: Write>(mut writer: W, records: &[ProcurementRecord]) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// Flat CSV with one column per field plus a joined `vendors` column.
pub fn write_csv<W: Write>(writer: W, records: &[ProcurementRecord]) -> ExportResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
    header.push("vendors");
    csv.write_record(&header)?;

    for r in records {
        csv.write_record([
            r.sr_no.clone(),
            r.manager.clone(),
            r.member.clone(),
            r.group_category.clone(),
            r.no_of_part_codes.to_string(),
            r.avg_spent.to_string(),
            r.target_savings.to_string(),
            r.achieved_savings.to_string(),
            r.vendors.join(VENDOR_SEPARATOR),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write `records` in the requested format.
pub fn write_records<W: Write>(
    writer: W,
    records: &[ProcurementRecord],
    format: OutputFormat,
) -> ExportResult<()> {
    match format {
        OutputFormat::Json => write_json(writer, records),
        OutputFormat::Csv => write_csv(writer, records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use crate::transform::map_records;

    fn sample() -> Vec<ProcurementRecord> {
        vec![ProcurementRecord {
            sr_no: "1".into(),
            manager: "Gaurav".into(),
            member: "Maninder".into(),
            group_category: "Cables, Wires".into(),
            no_of_part_codes: 254,
            avg_spent: 175.5,
            target_savings: 20.0,
            achieved_savings: 25.0,
            vendors: vec!["Eaton".into(), "L&T".into()],
        }]
    }

    #[test]
    fn test_json_export() {
        let mut out = Vec::new();
        write_json(&mut out, &sample()).unwrap();

        let parsed: Vec<ProcurementRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_csv_export() {
        let mut out = Vec::new();
        write_csv(&mut out, &sample()).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("srNo,manager,member,groupCategory,noOfPartCodes,avgSpent,targetSavings,achievedSavings,vendors")
        );
        assert_eq!(
            lines.next(),
            Some("1,Gaurav,Maninder,\"Cables, Wires\",254,175.5,20,25,Eaton; L&T")
        );
    }

    #[test]
    fn test_csv_export_reads_back_through_tokenizer() {
        let mut out = Vec::new();
        write_records(&mut out, &sample(), OutputFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();

        let rows = tokenize(&text);
        assert_eq!(rows[1][3], "Cables, Wires");

        let records = map_records(&rows).unwrap();
        assert_eq!(records[0].manager, "Gaurav");
        assert_eq!(records[0].no_of_part_codes, 254);
        assert_eq!(records[0].achieved_savings, 25.0);
    }
}

//! Domain models for the procurement ingestion pipeline.
//!
//! - [`RawRow`] - One tokenized logical CSV row
//! - [`Field`] - Semantic fields a sheet column can resolve to
//! - [`ProcurementRecord`] - One typed record per data row

use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Rows
// =============================================================================

/// Ordered string cells of one logical CSV row.
///
/// No fixed arity: malformed sheets produce rows shorter or longer than
/// the header.
pub type RawRow = Vec<String>;

// =============================================================================
// Semantic Fields
// =============================================================================

/// Semantic fields located in a sheet by fuzzy header matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SrNo,
    Manager,
    Member,
    GroupCategory,
    NoOfPartCodes,
    AvgSpent,
    TargetSavings,
    AchievedSavings,
}

impl Field {
    /// All fields, in declaration order.
    pub const ALL: [Field; 8] = [
        Field::SrNo,
        Field::Manager,
        Field::Member,
        Field::GroupCategory,
        Field::NoOfPartCodes,
        Field::AvgSpent,
        Field::TargetSavings,
        Field::AchievedSavings,
    ];

    /// The camelCase key used in serialized records.
    pub fn key(&self) -> &'static str {
        match self {
            Field::SrNo => "srNo",
            Field::Manager => "manager",
            Field::Member => "member",
            Field::GroupCategory => "groupCategory",
            Field::NoOfPartCodes => "noOfPartCodes",
            Field::AvgSpent => "avgSpent",
            Field::TargetSavings => "targetSavings",
            Field::AchievedSavings => "achievedSavings",
        }
    }

    /// Position of this field in [`Field::ALL`].
    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Procurement Record
// =============================================================================

/// One typed row of the procurement sheet.
///
/// Numeric fields fall back to `0` when the cell is missing or malformed.
/// Savings are plain percentages: `"20%"` becomes `20.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementRecord {
    /// Serial number, kept as written (may hold non-numeric markers).
    pub sr_no: String,
    pub manager: String,
    pub member: String,
    pub group_category: String,
    pub no_of_part_codes: u32,
    pub avg_spent: f64,
    pub target_savings: f64,
    pub achieved_savings: f64,
    /// Non-empty vendor cells in column order.
    #[serde(default)]
    pub vendors: Vec<String>,
}

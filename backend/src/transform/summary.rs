//! Dashboard aggregates over mapped procurement records.
//!
//! Groups records by manager and by group category, and counts how often each
//! vendor appears. Feeds the dashboard's summary cards and tables.
//!
//! ```text
//! Records (one per part group)             →  Summary
//! ┌───────────────────────────────┐          ┌──────────────────────────┐
//! │ Gaurav / Maninder / Switchgear│          │ Gaurav: 2 groups, 1 memb │
//! │ Gaurav / Maninder / Cables    │   →      ├──────────────────────────┤
//! │ Asha   / Ravi     / Motors    │          │ Asha:   1 group, 1 memb  │
//! └───────────────────────────────┘          └──────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::models::ProcurementRecord;

/// Whole-sheet summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub generated_at: DateTime<Utc>,
    pub total_records: usize,
    pub total_part_codes: u64,
    pub total_avg_spent: f64,
    pub mean_target_savings: f64,
    pub mean_achieved_savings: f64,
    /// Sorted by manager name.
    pub managers: Vec<ManagerSummary>,
    /// Sorted by group category.
    pub categories: Vec<CategorySummary>,
    /// Most frequent first, then by name.
    pub vendors: Vec<VendorCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSummary {
    pub manager: String,
    pub members: Vec<String>,
    pub group_count: usize,
    pub part_codes: u64,
    pub avg_spent: f64,
    pub mean_target_savings: f64,
    pub mean_achieved_savings: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub group_category: String,
    pub part_codes: u64,
    pub avg_spent: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VendorCount {
    pub vendor: String,
    pub count: usize,
}

/// Accumulates one manager's records.
#[derive(Default)]
struct ManagerBuilder {
    members: BTreeSet<String>,
    group_count: usize,
    part_codes: u64,
    avg_spent: f64,
    target_total: f64,
    achieved_total: f64,
}

impl ManagerBuilder {
    fn add(&mut self, record: &ProcurementRecord) {
        if !record.member.is_empty() {
            self.members.insert(record.member.clone());
        }
        self.group_count += 1;
        self.part_codes += u64::from(record.no_of_part_codes);
        self.avg_spent += record.avg_spent;
        self.target_total += record.target_savings;
        self.achieved_total += record.achieved_savings;
    }

    fn build(self, manager: String) -> ManagerSummary {
        ManagerSummary {
            manager,
            members: self.members.into_iter().collect(),
            group_count: self.group_count,
            part_codes: self.part_codes,
            avg_spent: self.avg_spent,
            mean_target_savings: mean(self.target_total, self.group_count),
            mean_achieved_savings: mean(self.achieved_total, self.group_count),
        }
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Build the dashboard summary for a set of records.
pub fn summarize(records: &[ProcurementRecord]) -> DashboardSummary {
    let mut managers: HashMap<String, ManagerBuilder> = HashMap::new();
    let mut categories: HashMap<String, CategorySummary> = HashMap::new();
    let mut vendors: HashMap<&str, usize> = HashMap::new();

    for record in records {
        managers.entry(record.manager.clone()).or_default().add(record);

        let category = categories
            .entry(record.group_category.clone())
            .or_insert_with(|| CategorySummary {
                group_category: record.group_category.clone(),
                part_codes: 0,
                avg_spent: 0.0,
            });
        category.part_codes += u64::from(record.no_of_part_codes);
        category.avg_spent += record.avg_spent;

        for vendor in &record.vendors {
            *vendors.entry(vendor.as_str()).or_default() += 1;
        }
    }

    let mut managers: Vec<ManagerSummary> =
        managers.into_iter().map(|(name, b)| b.build(name)).collect();
    managers.sort_by(|a, b| a.manager.cmp(&b.manager));

    let mut categories: Vec<CategorySummary> = categories.into_values().collect();
    categories.sort_by(|a, b| a.group_category.cmp(&b.group_category));

    let mut vendors: Vec<VendorCount> = vendors
        .into_iter()
        .map(|(vendor, count)| VendorCount { vendor: vendor.to_string(), count })
        .collect();
    vendors.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.vendor.cmp(&b.vendor)));

    let total = records.len();
    DashboardSummary {
        generated_at: Utc::now(),
        total_records: total,
        total_part_codes: records.iter().map(|r| u64::from(r.no_of_part_codes)).sum(),
        total_avg_spent: records.iter().map(|r| r.avg_spent).sum(),
        mean_target_savings: mean(records.iter().map(|r| r.target_savings).sum(), total),
        mean_achieved_savings: mean(records.iter().map(|r| r.achieved_savings).sum(), total),
        managers,
        categories,
        vendors,
    }
}

//! Year by month heatmap cells.

use crate::data::EncounterRecord;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub year: i32,
    pub month: String,
    /// Largest count recorded for this year and month.
    pub value: u64,
}

/// One cell per (year, month) pair present in the data.
///
/// Years ascend; months follow their first appearance in the records.
pub fn heatmap_cells(records: &[EncounterRecord]) -> Vec<HeatmapCell> {
    let mut months: Vec<&str> = Vec::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();
    let mut values: HashMap<(i32, &str), u64> = HashMap::new();

    for record in records {
        let month = record.month.as_str();
        if !months.contains(&month) {
            months.push(month);
        }
        years.insert(record.year);
        values
            .entry((record.year, month))
            .and_modify(|v| *v = (*v).max(record.total_encounters))
            .or_insert(record.total_encounters);
    }

    let mut cells = Vec::with_capacity(values.len());
    for year in years {
        for month in &months {
            if let Some(value) = values.get(&(year, *month)) {
                cells.push(HeatmapCell {
                    year,
                    month: (*month).to_string(),
                    value: *value,
                });
            }
        }
    }
    cells
}

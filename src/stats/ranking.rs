//! Ranked month table for a selected year.

use crate::data::EncounterRecord;
use serde::Serialize;

/// Months of one year ordered by encounter count, largest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopMonths {
    pub rows: Vec<EncounterRecord>,
    /// Upper bound for progress bars; 0 when there are no rows.
    pub max_total: u64,
}

pub fn top_months(records: &[EncounterRecord], selected_year: i32) -> TopMonths {
    let mut rows: Vec<EncounterRecord> = records
        .iter()
        .filter(|r| r.year == selected_year)
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.total_encounters.cmp(&a.total_encounters));

    let max_total = rows.first().map(|r| r.total_encounters).unwrap_or(0);
    TopMonths { rows, max_total }
}

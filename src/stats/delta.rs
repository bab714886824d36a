//! Year-over-year Delta Module
//! Joins a selected year against the prior year by month label.

use crate::data::EncounterRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One month of the selected year compared with the same month a year earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyDelta {
    pub month: String,
    pub total_encounters: u64,
    pub delta: i64,
}

impl YearlyDelta {
    pub fn new(month: impl Into<String>, total_encounters: u64, delta: i64) -> Self {
        Self {
            month: month.into(),
            total_encounters,
            delta,
        }
    }
}

/// Deltas for a selected year together with whether a baseline year existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearComparison {
    pub selected_year: i32,
    pub has_previous_year: bool,
    pub deltas: Vec<YearlyDelta>,
}

impl YearComparison {
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

fn as_signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Compute per-month deltas for `selected_year`, sorted by delta descending.
///
/// Months are joined on their label. A month missing from the previous year
/// is compared against zero, and months that only exist in the previous year
/// are left out. The sort is stable, so ties keep source month order.
pub fn compute_deltas(records: &[EncounterRecord], selected_year: i32) -> Vec<YearlyDelta> {
    let mut previous: HashMap<&str, u64> = HashMap::new();
    if let Some(previous_year) = selected_year.checked_sub(1) {
        for record in records.iter().filter(|r| r.year == previous_year) {
            previous
                .entry(record.month.as_str())
                .or_insert(record.total_encounters);
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut deltas: Vec<YearlyDelta> = Vec::new();
    for record in records.iter().filter(|r| r.year == selected_year) {
        if !seen.insert(record.month.as_str()) {
            continue;
        }
        let prior = previous.get(record.month.as_str()).copied().unwrap_or(0);
        deltas.push(YearlyDelta::new(
            record.month.clone(),
            record.total_encounters,
            as_signed(record.total_encounters).saturating_sub(as_signed(prior)),
        ));
    }

    deltas.sort_by(|a, b| b.delta.cmp(&a.delta));
    debug!(selected_year, months = deltas.len(), "computed deltas");
    deltas
}

/// Compute deltas and record whether the prior year is present at all.
pub fn compare_year(records: &[EncounterRecord], selected_year: i32) -> YearComparison {
    let has_previous_year = selected_year
        .checked_sub(1)
        .is_some_and(|previous| records.iter().any(|r| r.year == previous));

    YearComparison {
        selected_year,
        has_previous_year,
        deltas: compute_deltas(records, selected_year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario() -> Vec<EncounterRecord> {
        vec![
            EncounterRecord::new(2022, "Jan", 1000),
            EncounterRecord::new(2023, "Jan", 1500),
            EncounterRecord::new(2023, "Feb", 800),
        ]
    }

    #[test]
    fn reference_scenario_sorts_descending() {
        let deltas = compute_deltas(&scenario(), 2023);
        assert_eq!(
            deltas,
            vec![
                YearlyDelta::new("Feb", 800, 800),
                YearlyDelta::new("Jan", 1500, 500),
            ]
        );
    }

    #[test]
    fn join_is_by_label_not_position() {
        let records = vec![
            EncounterRecord::new(2022, "Feb", 300),
            EncounterRecord::new(2022, "Jan", 100),
            EncounterRecord::new(2023, "Jan", 150),
            EncounterRecord::new(2023, "Feb", 200),
        ];

        let deltas = compute_deltas(&records, 2023);

        assert_eq!(
            deltas,
            vec![
                YearlyDelta::new("Jan", 150, 50),
                YearlyDelta::new("Feb", 200, -100),
            ]
        );
    }

    #[test]
    fn months_only_in_previous_year_are_excluded() {
        let records = vec![
            EncounterRecord::new(2022, "Dec", 5000),
            EncounterRecord::new(2023, "Jan", 10),
        ];
        let deltas = compute_deltas(&records, 2023);
        assert_eq!(deltas, vec![YearlyDelta::new("Jan", 10, 10)]);
    }

    #[test]
    fn ties_keep_month_order() {
        let records = vec![
            EncounterRecord::new(2023, "Mar", 40),
            EncounterRecord::new(2023, "Jan", 70),
            EncounterRecord::new(2023, "Feb", 70),
        ];
        let months: Vec<String> = compute_deltas(&records, 2023)
            .into_iter()
            .map(|d| d.month)
            .collect();
        assert_eq!(months, vec!["Jan", "Feb", "Mar"]);
    }

    #[test]
    fn earliest_year_uses_raw_totals() {
        let comparison = compare_year(&scenario(), 2022);
        assert!(!comparison.has_previous_year);
        assert_eq!(comparison.deltas, vec![YearlyDelta::new("Jan", 1000, 1000)]);
    }

    #[test]
    fn unknown_year_yields_empty_sequence() {
        let comparison = compare_year(&scenario(), 1999);
        assert!(comparison.is_empty());
        assert!(!comparison.has_previous_year);
    }

    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    fn year_strategy() -> impl Strategy<Value = Vec<Option<u64>>> {
        prop::collection::vec(prop::option::of(0u64..3_000_000), 12)
    }

    proptest! {
        #[test]
        fn delta_sum_matches_joined_totals(current in year_strategy(), previous in year_strategy()) {
            let mut records = Vec::new();
            for (month, value) in MONTHS.iter().zip(&previous) {
                if let Some(v) = value {
                    records.push(EncounterRecord::new(2022, *month, *v));
                }
            }
            for (month, value) in MONTHS.iter().zip(&current) {
                if let Some(v) = value {
                    records.push(EncounterRecord::new(2023, *month, *v));
                }
            }

            let deltas = compute_deltas(&records, 2023);

            let delta_sum: i64 = deltas.iter().map(|d| d.delta).sum();
            let current_sum: i64 = current.iter().flatten().map(|v| *v as i64).sum();
            let joined_previous: i64 = current
                .iter()
                .zip(&previous)
                .filter(|(c, _)| c.is_some())
                .filter_map(|(_, p)| *p)
                .map(|v| v as i64)
                .sum();
            prop_assert_eq!(delta_sum, current_sum - joined_previous);
            prop_assert!(deltas.windows(2).all(|w| w[0].delta >= w[1].delta));
        }
    }
}

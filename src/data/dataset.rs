//! Encounter records and the immutable dataset they are loaded into.

use crate::data::{Normalized, ParseWarning};
use serde::{Deserialize, Serialize};

/// Encounter count for one month of one year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub year: i32,
    pub month: String,
    pub total_encounters: u64,
}

impl EncounterRecord {
    pub fn new(year: i32, month: impl Into<String>, total_encounters: u64) -> Self {
        Self {
            year,
            month: month.into(),
            total_encounters,
        }
    }
}

/// Normalized records for a session, in source order.
#[derive(Debug, Clone, Default)]
pub struct EncounterDataset {
    records: Vec<EncounterRecord>,
    warnings: Vec<ParseWarning>,
}

impl EncounterDataset {
    pub fn new(records: Vec<EncounterRecord>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
        }
    }

    pub fn from_normalized(normalized: Normalized) -> Self {
        Self {
            records: normalized.records,
            warnings: normalized.warnings,
        }
    }

    pub fn records(&self) -> &[EncounterRecord] {
        &self.records
    }

    /// Warnings collected while the rows were normalized.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years in order of first appearance.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = Vec::new();
        for record in &self.records {
            if !years.contains(&record.year) {
                years.push(record.year);
            }
        }
        years
    }

    /// Years as offered to the year selector: first-appearance order reversed.
    pub fn year_options(&self) -> Vec<i32> {
        let mut years = self.years();
        years.reverse();
        years
    }

    /// The selector's initial choice, the last option (first year in the file).
    pub fn default_year(&self) -> Option<i32> {
        self.year_options().last().copied()
    }
}

//! Data Processor Module
//! Normalizes raw CSV cells into typed encounter records.

use crate::data::EncounterRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Characters used as digit grouping separators in count columns.
const GROUPING_CHARS: [char; 5] = [',', '_', ' ', '\'', '\u{a0}'];

/// One row as read from the source, every cell still untyped.
#[derive(Debug, Clone, Default)]
pub struct RawRow<'a> {
    pub year: Option<&'a str>,
    pub month: Option<&'a str>,
    pub total: Option<&'a str>,
    /// Non-empty cells found past the last header column.
    pub extra: Vec<&'a str>,
}

impl<'a> RawRow<'a> {
    pub fn new(year: Option<&'a str>, month: Option<&'a str>, total: Option<&'a str>) -> Self {
        Self {
            year,
            month,
            total,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(self, extra: Vec<&'a str>) -> Self {
        Self { extra, ..self }
    }
}

/// Non-fatal problem found while normalizing a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// Year could not be read as an integer; the row was dropped.
    UnparseableYear { row: usize, raw: String },
    /// Month label was empty; the row was dropped.
    MissingMonth { row: usize },
    /// Count was malformed and replaced with zero.
    CountDefaulted { row: usize, raw: String },
    /// A second row for an already seen (year, month) pair; the row was dropped.
    DuplicateMonth { row: usize, year: i32, month: String },
    /// An unquoted count like `1,234` split over several fields was joined back.
    CountRejoined { row: usize, raw: String },
    /// More fields than the header that could not be joined; the row was dropped.
    RaggedRow { row: usize, extra_fields: usize },
}

impl ParseWarning {
    pub fn row(&self) -> usize {
        match self {
            ParseWarning::UnparseableYear { row, .. }
            | ParseWarning::MissingMonth { row }
            | ParseWarning::CountDefaulted { row, .. }
            | ParseWarning::DuplicateMonth { row, .. }
            | ParseWarning::CountRejoined { row, .. }
            | ParseWarning::RaggedRow { row, .. } => *row,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnparseableYear { row, raw } => {
                write!(f, "row {row}: unparseable year {raw:?}, row dropped")
            }
            ParseWarning::MissingMonth { row } => write!(f, "row {row}: missing month, row dropped"),
            ParseWarning::CountDefaulted { row, raw } => {
                write!(f, "row {row}: unparseable count {raw:?}, using 0")
            }
            ParseWarning::DuplicateMonth { row, year, month } => {
                write!(f, "row {row}: duplicate entry for {month} {year}, row dropped")
            }
            ParseWarning::CountRejoined { row, raw } => {
                write!(f, "row {row}: unquoted count {raw:?} rejoined")
            }
            ParseWarning::RaggedRow { row, extra_fields } => {
                write!(f, "row {row}: {extra_fields} field(s) past the header, row dropped")
            }
        }
    }
}

/// Output of a normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<EncounterRecord>,
    pub warnings: Vec<ParseWarning>,
}

/// Handles data cleaning for encounter rows.
pub struct DataProcessor;

impl DataProcessor {
    /// Remove thousands separators and surrounding whitespace.
    pub fn strip_grouping(raw: &str) -> String {
        raw.trim()
            .chars()
            .filter(|c| !GROUPING_CHARS.contains(c))
            .collect()
    }

    /// Parse an encounter count.
    ///
    /// An empty cell counts as zero. Returns `None` when the cell holds
    /// something that is not a non-negative whole number.
    pub fn parse_count(raw: &str) -> Option<u64> {
        let cleaned = Self::strip_grouping(raw);
        if cleaned.is_empty() {
            return Some(0);
        }
        if let Ok(value) = cleaned.parse::<u64>() {
            return Some(value);
        }

        // Spreadsheet exports sometimes write counts as "1234.0"
        let value = cleaned.parse::<f64>().ok()?;
        if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
            Some(value as u64)
        } else {
            None
        }
    }

    /// Parse a year cell, accepting "2023", "2,023" and "2023.0".
    pub fn parse_year(raw: &str) -> Option<i32> {
        let cleaned = Self::strip_grouping(raw);
        if cleaned.is_empty() {
            return None;
        }
        if let Ok(year) = cleaned.parse::<i32>() {
            return Some(year);
        }

        let value = cleaned.parse::<f64>().ok()?;
        if value.is_finite()
            && value.fract() == 0.0
            && value >= f64::from(i32::MIN)
            && value <= f64::from(i32::MAX)
        {
            Some(value as i32)
        } else {
            None
        }
    }

    /// Join a count whose thousands separators were read as field breaks.
    ///
    /// `head` must be 1 to 3 digits and every tail cell exactly 3 digits,
    /// so `["1", "234"]` becomes 1234 and `["30", "extra"]` is rejected.
    pub fn rejoin_count(head: &str, tail: &[&str]) -> Option<u64> {
        let is_digits = |cell: &str| cell.chars().all(|c| c.is_ascii_digit());
        let head = head.trim();
        if head.is_empty() || head.len() > 3 || !is_digits(head) {
            return None;
        }
        if !tail
            .iter()
            .map(|cell| cell.trim())
            .all(|cell| cell.len() == 3 && is_digits(cell))
        {
            return None;
        }

        std::iter::once(head)
            .chain(tail.iter().map(|cell| cell.trim()))
            .collect::<String>()
            .parse()
            .ok()
    }

    /// Turn raw rows into records.
    ///
    /// Rows with an unparseable year or an empty month are dropped, malformed
    /// or missing counts become zero, and only the first row of each
    /// (year, month) pair is kept. Extra fields are joined back into the
    /// count when they look like its digit groups, otherwise the row is
    /// dropped. Row numbers in warnings are 1-based data rows, not counting
    /// the header.
    pub fn normalize_rows<'a, I>(rows: I) -> Normalized
    where
        I: IntoIterator<Item = RawRow<'a>>,
    {
        let mut out = Normalized::default();
        let mut seen: HashSet<(i32, String)> = HashSet::new();

        for (index, cells) in rows.into_iter().enumerate() {
            let row = index + 1;

            let Some(year) = cells.year.and_then(Self::parse_year) else {
                out.push_warning(ParseWarning::UnparseableYear {
                    row,
                    raw: cells.year.unwrap_or_default().to_string(),
                });
                continue;
            };

            let month = cells.month.map(str::trim).unwrap_or_default();
            if month.is_empty() {
                out.push_warning(ParseWarning::MissingMonth { row });
                continue;
            }

            let total_encounters = match cells.total {
                Some(head) if !cells.extra.is_empty() => {
                    let Some(value) = Self::rejoin_count(head, &cells.extra) else {
                        out.push_warning(ParseWarning::RaggedRow {
                            row,
                            extra_fields: cells.extra.len(),
                        });
                        continue;
                    };
                    let raw = std::iter::once(head)
                        .chain(cells.extra.iter().copied())
                        .collect::<Vec<_>>()
                        .join(",");
                    out.push_warning(ParseWarning::CountRejoined { row, raw });
                    value
                }
                None if !cells.extra.is_empty() => {
                    out.push_warning(ParseWarning::RaggedRow {
                        row,
                        extra_fields: cells.extra.len(),
                    });
                    continue;
                }
                None => 0,
                Some(cell) => Self::parse_count(cell).unwrap_or_else(|| {
                    out.push_warning(ParseWarning::CountDefaulted {
                        row,
                        raw: cell.to_string(),
                    });
                    0
                }),
            };

            if !seen.insert((year, month.to_string())) {
                out.push_warning(ParseWarning::DuplicateMonth {
                    row,
                    year,
                    month: month.to_string(),
                });
                continue;
            }

            out.records.push(EncounterRecord::new(year, month, total_encounters));
        }

        out
    }
}

impl Normalized {
    fn push_warning(&mut self, warning: ParseWarning) {
        warn!(%warning, "normalized malformed row");
        self.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row<'a>(year: &'a str, month: &'a str, total: &'a str) -> RawRow<'a> {
        RawRow::new(Some(year), Some(month), Some(total))
    }

    #[test]
    fn thousands_separator_is_stripped() {
        assert_eq!(DataProcessor::parse_count("1,234"), Some(1234));
        assert_eq!(DataProcessor::parse_count(" 2,401,115 "), Some(2_401_115));
        assert_eq!(DataProcessor::parse_count("1_000"), Some(1000));
    }

    #[test]
    fn empty_count_is_zero() {
        assert_eq!(DataProcessor::parse_count(""), Some(0));
        assert_eq!(DataProcessor::parse_count("   "), Some(0));
    }

    #[test]
    fn malformed_count_is_rejected() {
        assert_eq!(DataProcessor::parse_count("n/a"), None);
        assert_eq!(DataProcessor::parse_count("-40"), None);
        assert_eq!(DataProcessor::parse_count("12.5"), None);
    }

    #[test]
    fn float_formatted_values_are_accepted() {
        assert_eq!(DataProcessor::parse_count("1234.0"), Some(1234));
        assert_eq!(DataProcessor::parse_year("2023.0"), Some(2023));
        assert_eq!(DataProcessor::parse_year("2,023"), Some(2023));
    }

    #[test]
    fn unparseable_year_drops_row() {
        let normalized =
            DataProcessor::normalize_rows(vec![row("FY23", "Jan", "10"), row("2023", "Feb", "5")]);

        assert_eq!(normalized.records, vec![EncounterRecord::new(2023, "Feb", 5)]);
        assert_eq!(
            normalized.warnings,
            vec![ParseWarning::UnparseableYear {
                row: 1,
                raw: "FY23".to_string()
            }]
        );
    }

    #[test]
    fn missing_count_is_kept_as_zero() {
        let normalized = DataProcessor::normalize_rows(vec![
            RawRow::new(Some("2023"), Some("Jan"), None),
            row("2023", "Feb", ""),
        ]);

        assert_eq!(
            normalized.records,
            vec![
                EncounterRecord::new(2023, "Jan", 0),
                EncounterRecord::new(2023, "Feb", 0),
            ]
        );
        assert!(normalized.warnings.is_empty());
    }

    #[test]
    fn malformed_count_warns_and_defaults() {
        let normalized = DataProcessor::normalize_rows(vec![row("2023", "Jan", "lots")]);

        assert_eq!(normalized.records, vec![EncounterRecord::new(2023, "Jan", 0)]);
        assert_eq!(normalized.warnings.len(), 1);
        assert_eq!(normalized.warnings[0].row(), 1);
    }

    #[test]
    fn duplicate_pair_keeps_first_row() {
        let normalized = DataProcessor::normalize_rows(vec![
            row("2023", "Jan", "10"),
            row("2023", " Jan ", "99"),
            row("2022", "Jan", "7"),
        ]);

        assert_eq!(
            normalized.records,
            vec![
                EncounterRecord::new(2023, "Jan", 10),
                EncounterRecord::new(2022, "Jan", 7),
            ]
        );
        assert!(matches!(
            normalized.warnings.as_slice(),
            [ParseWarning::DuplicateMonth { row: 2, year: 2023, .. }]
        ));
    }

    #[test]
    fn split_count_is_rejoined() {
        let normalized = DataProcessor::normalize_rows(vec![
            row("2023", "Apr", "1").with_extra(vec!["234"]),
            row("2023", "May", "12").with_extra(vec!["345", "678"]),
        ]);

        assert_eq!(
            normalized.records,
            vec![
                EncounterRecord::new(2023, "Apr", 1234),
                EncounterRecord::new(2023, "May", 12_345_678),
            ]
        );
        assert_eq!(
            normalized.warnings[0],
            ParseWarning::CountRejoined {
                row: 1,
                raw: "1,234".to_string()
            }
        );
    }

    #[test]
    fn unjoinable_extra_fields_drop_row() {
        let normalized = DataProcessor::normalize_rows(vec![
            row("2023", "Mar", "30").with_extra(vec!["extra"]),
            row("2023", "Apr", "1").with_extra(vec!["23"]),
            row("2023", "May", "7"),
        ]);

        assert_eq!(normalized.records, vec![EncounterRecord::new(2023, "May", 7)]);
        assert_eq!(
            normalized.warnings,
            vec![
                ParseWarning::RaggedRow { row: 1, extra_fields: 1 },
                ParseWarning::RaggedRow { row: 2, extra_fields: 1 },
            ]
        );
    }

    #[test]
    fn rejoin_requires_digit_groups() {
        assert_eq!(DataProcessor::rejoin_count("2", &["401", "115"]), Some(2_401_115));
        assert_eq!(DataProcessor::rejoin_count("1234", &["567"]), None);
        assert_eq!(DataProcessor::rejoin_count("", &["567"]), None);
        assert_eq!(DataProcessor::rejoin_count("1", &["5x7"]), None);
    }

    #[test]
    fn blank_month_drops_row() {
        let normalized = DataProcessor::normalize_rows(vec![row("2023", "  ", "10")]);
        assert!(normalized.records.is_empty());
        assert_eq!(normalized.warnings, vec![ParseWarning::MissingMonth { row: 1 }]);
    }
}

//! Headline months: the largest gain and the largest loss of a year.

use crate::stats::{YearComparison, YearlyDelta};
use serde::Serialize;

/// A headline slot, either a computed month or the placeholder shown when
/// there is nothing meaningful to compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadlineMetric {
    Month(YearlyDelta),
    Placeholder,
}

impl HeadlineMetric {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, HeadlineMetric::Placeholder)
    }

    pub fn month(&self) -> Option<&YearlyDelta> {
        match self {
            HeadlineMetric::Month(delta) => Some(delta),
            HeadlineMetric::Placeholder => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub top: HeadlineMetric,
    pub bottom: HeadlineMetric,
}

impl Headline {
    pub fn placeholder() -> Self {
        Self {
            top: HeadlineMetric::Placeholder,
            bottom: HeadlineMetric::Placeholder,
        }
    }
}

/// Pick the first and last entries of a descending delta sequence.
///
/// Fewer than two months gives placeholders in both slots.
pub fn headline(deltas: &[YearlyDelta]) -> Headline {
    match deltas {
        [first, .., last] => Headline {
            top: HeadlineMetric::Month(first.clone()),
            bottom: HeadlineMetric::Month(last.clone()),
        },
        _ => Headline::placeholder(),
    }
}

/// Headline for a comparison, suppressed when the prior year is absent.
pub fn comparison_headline(comparison: &YearComparison) -> Headline {
    if comparison.has_previous_year {
        headline(&comparison.deltas)
    } else {
        Headline::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EncounterRecord;
    use crate::stats::compare_year;

    fn records() -> Vec<EncounterRecord> {
        vec![
            EncounterRecord::new(2022, "Jan", 1000),
            EncounterRecord::new(2023, "Jan", 1500),
            EncounterRecord::new(2023, "Feb", 800),
        ]
    }

    #[test]
    fn top_and_bottom_come_from_sorted_ends() {
        let comparison = compare_year(&records(), 2023);
        let headline = comparison_headline(&comparison);

        assert_eq!(headline.top, HeadlineMetric::Month(YearlyDelta::new("Feb", 800, 800)));
        assert_eq!(headline.bottom, HeadlineMetric::Month(YearlyDelta::new("Jan", 1500, 500)));
    }

    #[test]
    fn earliest_year_is_placeholder() {
        let comparison = compare_year(&records(), 2022);
        assert_eq!(comparison_headline(&comparison), Headline::placeholder());
    }

    #[test]
    fn single_month_is_placeholder() {
        let headline = headline(&[YearlyDelta::new("Jan", 10, 5)]);
        assert!(headline.top.is_placeholder());
        assert!(headline.bottom.is_placeholder());
    }

    #[test]
    fn empty_selection_is_placeholder() {
        assert_eq!(headline(&[]), Headline::placeholder());
        assert_eq!(headline(&[]).top.month(), None);
    }
}

//! Donut chart data for the gain/loss shares.

use crate::charts::palette::{Category, DonutPalette, DonutTone, DONUT_LABEL_COLOR};
use crate::stats::CategorySummary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonutChart {
    pub category: Category,
    pub label: &'static str,
    pub tone: DonutTone,
    pub palette: DonutPalette,
    pub label_color: &'static str,
    /// Percentage shown in the middle of the ring.
    pub share: u8,
    /// Arc sizes as `[remainder, share]`.
    pub segments: [u8; 2],
    /// Full background ring.
    pub background: [u8; 2],
}

impl DonutChart {
    pub fn new(category: Category, share: u8, has_previous_year: bool) -> Self {
        let share = share.min(100);
        let style = category.style();
        Self {
            category,
            label: category.label(has_previous_year),
            tone: style.tone,
            palette: style.tone.palette(),
            label_color: DONUT_LABEL_COLOR,
            share,
            segments: [100 - share, share],
            background: [100, 0],
        }
    }

    pub fn caption(&self) -> String {
        format!("{} %", self.share)
    }
}

/// Gain and loss donuts for a category summary.
pub fn donut_pair(summary: CategorySummary, has_previous_year: bool) -> [DonutChart; 2] {
    [
        DonutChart::new(Category::Gain, summary.positive_share, has_previous_year),
        DonutChart::new(Category::Loss, summary.negative_share, has_previous_year),
    ]
}

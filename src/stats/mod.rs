//! Stats module - deltas, categorization, headline and ranking

mod categorize;
mod delta;
mod headline;
mod ranking;

pub use categorize::{categorize, CategorySummary, DEFAULT_THRESHOLD};
pub use delta::{compare_year, compute_deltas, YearComparison, YearlyDelta};
pub use headline::{comparison_headline, headline, Headline, HeadlineMetric};
pub use ranking::{top_months, TopMonths};

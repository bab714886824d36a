//! Encounter Dashboard - monthly border encounter analysis
//!
//! Loads a CSV of monthly encounter counts and computes what the dashboard
//! shows for a selected year: month-over-month deltas against the prior year,
//! the share of months with large gains and losses, the headline months, and
//! the table, heatmap and donut data built from them.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod format;
pub mod stats;

pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{Dashboard, DashboardSnapshot, MetricDisplay};
pub use data::{DataLoader, EncounterDataset, EncounterRecord, LoadError, ParseWarning};
pub use stats::{categorize, compute_deltas, headline, CategorySummary, Headline, YearlyDelta};

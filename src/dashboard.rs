//! Dashboard session.
//! Holds the loaded dataset and produces one snapshot per viewer selection.

use crate::charts::{donut_pair, heatmap_cells, ColorTheme, DonutChart, HeatmapCell};
use crate::config::DashboardConfig;
use crate::data::{DataLoader, EncounterDataset, LoadError};
use crate::format::format_number;
use crate::stats::{
    categorize, compare_year, comparison_headline, top_months, CategorySummary, Headline,
    HeadlineMetric, TopMonths, YearlyDelta,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Text shown for a headline slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDisplay {
    pub label: String,
    pub value: String,
    pub delta: String,
}

impl MetricDisplay {
    pub fn placeholder() -> Self {
        Self {
            label: "-".to_string(),
            value: "-".to_string(),
            delta: String::new(),
        }
    }
}

impl From<&HeadlineMetric> for MetricDisplay {
    fn from(metric: &HeadlineMetric) -> Self {
        match metric {
            HeadlineMetric::Month(delta) => Self {
                label: delta.month.clone(),
                value: format_number(i64::try_from(delta.total_encounters).unwrap_or(i64::MAX)),
                delta: format_number(delta.delta),
            },
            HeadlineMetric::Placeholder => Self::placeholder(),
        }
    }
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// `None` only when the dataset holds no records.
    pub selected_year: Option<i32>,
    pub year_options: Vec<i32>,
    pub color_theme: ColorTheme,
    pub threshold: i64,
    pub has_previous_year: bool,
    pub deltas: Vec<YearlyDelta>,
    pub summary: CategorySummary,
    pub headline: Headline,
    pub gain_metric: MetricDisplay,
    pub loss_metric: MetricDisplay,
    pub donuts: [DonutChart; 2],
    pub top_months: TopMonths,
    pub heatmap: Vec<HeatmapCell>,
}

/// A loaded dataset and the configuration it is viewed with.
pub struct Dashboard {
    dataset: EncounterDataset,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(dataset: EncounterDataset, config: DashboardConfig) -> Self {
        Self { dataset, config }
    }

    pub fn open(path: &Path, config: DashboardConfig) -> Result<Self, LoadError> {
        let dataset = DataLoader::load_csv(path)?;
        info!(
            years = ?dataset.years(),
            threshold = config.threshold,
            theme = %config.color_theme,
            "dashboard ready"
        );
        Ok(Self::new(dataset, config))
    }

    pub fn dataset(&self) -> &EncounterDataset {
        &self.dataset
    }

    pub fn config(&self) -> DashboardConfig {
        self.config
    }

    /// The year a configuration shows: its own selection, else the
    /// dataset's default year.
    pub fn resolved_year(&self, config: &DashboardConfig) -> Option<i32> {
        config
            .selected_year
            .or_else(|| self.dataset.default_year())
    }

    /// Snapshot for the configured selection.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot_with(self.config)
    }

    /// Snapshot for an alternative selection over the same dataset.
    pub fn snapshot_with(&self, config: DashboardConfig) -> DashboardSnapshot {
        let records = self.dataset.records();
        let Some(year) = self.resolved_year(&config) else {
            return self.empty_snapshot(config);
        };

        let comparison = compare_year(records, year);
        // Shares are only meaningful against a prior year.
        let summary = if comparison.has_previous_year {
            categorize(&comparison.deltas, config.threshold)
        } else {
            CategorySummary::default()
        };
        let headline = comparison_headline(&comparison);

        debug!(
            year,
            months = comparison.deltas.len(),
            has_previous_year = comparison.has_previous_year,
            positive_share = summary.positive_share,
            negative_share = summary.negative_share,
            "recomputed dashboard"
        );

        DashboardSnapshot {
            selected_year: Some(year),
            year_options: self.dataset.year_options(),
            color_theme: config.color_theme,
            threshold: config.threshold,
            has_previous_year: comparison.has_previous_year,
            gain_metric: MetricDisplay::from(&headline.top),
            loss_metric: MetricDisplay::from(&headline.bottom),
            donuts: donut_pair(summary, comparison.has_previous_year),
            top_months: top_months(records, year),
            heatmap: heatmap_cells(records),
            deltas: comparison.deltas,
            summary,
            headline,
        }
    }

    fn empty_snapshot(&self, config: DashboardConfig) -> DashboardSnapshot {
        let summary = CategorySummary::default();
        DashboardSnapshot {
            selected_year: None,
            year_options: Vec::new(),
            color_theme: config.color_theme,
            threshold: config.threshold,
            has_previous_year: false,
            deltas: Vec::new(),
            summary,
            headline: Headline::placeholder(),
            gain_metric: MetricDisplay::placeholder(),
            loss_metric: MetricDisplay::placeholder(),
            donuts: donut_pair(summary, false),
            top_months: TopMonths::default(),
            heatmap: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EncounterRecord;

    fn dashboard() -> Dashboard {
        let dataset = EncounterDataset::new(vec![
            EncounterRecord::new(2022, "Jan", 1_000_000),
            EncounterRecord::new(2022, "Feb", 2_000_000),
            EncounterRecord::new(2023, "Jan", 1_700_000),
            EncounterRecord::new(2023, "Feb", 1_200_000),
            EncounterRecord::new(2023, "Mar", 100_000),
        ]);
        Dashboard::new(dataset, DashboardConfig::default())
    }

    #[test]
    fn default_selection_is_first_year_in_file() {
        let snapshot = dashboard().snapshot();
        assert_eq!(snapshot.selected_year, Some(2022));
        assert!(!snapshot.has_previous_year);
        assert_eq!(snapshot.gain_metric, MetricDisplay::placeholder());
        assert_eq!(snapshot.summary, CategorySummary::default());
        assert_eq!(snapshot.donuts[0].label, "positive encounter amount");
    }

    #[test]
    fn selected_year_drives_every_panel() {
        let board = dashboard();
        let snapshot = board.snapshot_with(board.config().with_year(2023));

        assert!(snapshot.has_previous_year);
        assert_eq!(
            snapshot.deltas,
            vec![
                YearlyDelta::new("Jan", 1_700_000, 700_000),
                YearlyDelta::new("Mar", 100_000, 100_000),
                YearlyDelta::new("Feb", 1_200_000, -800_000),
            ]
        );
        // 1 gain and 1 loss out of 3 months
        assert_eq!(snapshot.summary.positive_share, 33);
        assert_eq!(snapshot.summary.negative_share, 33);
        assert_eq!(snapshot.gain_metric.label, "Jan");
        assert_eq!(snapshot.gain_metric.value, "1.7 M");
        assert_eq!(snapshot.gain_metric.delta, "700 K");
        assert_eq!(snapshot.loss_metric.label, "Feb");
        assert_eq!(snapshot.loss_metric.delta, "-800 K");
        assert_eq!(snapshot.donuts[1].label, "Outbound Migration");
        assert_eq!(snapshot.top_months.max_total, 1_700_000);
        assert_eq!(snapshot.year_options, vec![2023, 2022]);
        assert_eq!(snapshot.heatmap.len(), 5);
    }

    #[test]
    fn explicit_year_overrides_default() {
        let board = dashboard();
        assert_eq!(board.resolved_year(&board.config()), Some(2022));
        assert_eq!(board.resolved_year(&board.config().with_year(2023)), Some(2023));

        let snapshot = board.snapshot_with(board.config().with_year(2023));
        assert_eq!(snapshot.selected_year, Some(2023));
        assert_eq!(board.dataset().len(), 5);
    }

    #[test]
    fn unknown_year_gives_placeholders() {
        let board = dashboard();
        let snapshot = board.snapshot_with(board.config().with_year(1990));

        assert!(snapshot.deltas.is_empty());
        assert_eq!(snapshot.headline, Headline::placeholder());
        assert_eq!(snapshot.summary, CategorySummary::default());
        assert!(snapshot.top_months.rows.is_empty());
    }

    #[test]
    fn empty_dataset_snapshot() {
        let board = Dashboard::new(EncounterDataset::default(), DashboardConfig::default());
        let snapshot = board.snapshot();
        assert_eq!(snapshot.selected_year, None);
        assert_eq!(board.resolved_year(&board.config()), None);
        assert_eq!(snapshot.loss_metric, MetricDisplay::placeholder());
    }
}

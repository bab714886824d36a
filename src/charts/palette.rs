//! Color palettes handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sequential color schemes offered for the heatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Blues,
    Cividis,
    Greens,
    Inferno,
    Magma,
    Plasma,
    Reds,
    Rainbow,
    Turbo,
    Viridis,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 10] = [
        ColorTheme::Blues,
        ColorTheme::Cividis,
        ColorTheme::Greens,
        ColorTheme::Inferno,
        ColorTheme::Magma,
        ColorTheme::Plasma,
        ColorTheme::Reds,
        ColorTheme::Rainbow,
        ColorTheme::Turbo,
        ColorTheme::Viridis,
    ];

    /// Scheme name as understood by charting libraries.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Blues => "blues",
            ColorTheme::Cividis => "cividis",
            ColorTheme::Greens => "greens",
            ColorTheme::Inferno => "inferno",
            ColorTheme::Magma => "magma",
            ColorTheme::Plasma => "plasma",
            ColorTheme::Reds => "reds",
            ColorTheme::Rainbow => "rainbow",
            ColorTheme::Turbo => "turbo",
            ColorTheme::Viridis => "viridis",
        }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for ColorTheme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColorTheme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Named tone for a donut ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonutTone {
    Blue,
    Green,
    Orange,
    Red,
}

/// Filled and background colors of a donut ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DonutPalette {
    pub fill: &'static str,
    pub track: &'static str,
}

const DONUT_PALETTES: [(DonutTone, DonutPalette); 4] = [
    (DonutTone::Blue, DonutPalette { fill: "#29b5e8", track: "#155F7A" }),
    (DonutTone::Green, DonutPalette { fill: "#27AE60", track: "#12783D" }),
    (DonutTone::Orange, DonutPalette { fill: "#F39C12", track: "#875A12" }),
    (DonutTone::Red, DonutPalette { fill: "#E74C3C", track: "#781F16" }),
];

/// Text color used for the percentage label inside every donut.
pub const DONUT_LABEL_COLOR: &str = "#29b5e8";

impl DonutTone {
    pub fn palette(self) -> DonutPalette {
        DONUT_PALETTES
            .iter()
            .find(|(tone, _)| *tone == self)
            .map(|(_, palette)| *palette)
            .unwrap_or(DONUT_PALETTES[0].1)
    }
}

/// Gain or loss bucket of the categorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gain,
    Loss,
}

/// How a category is labelled and colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub tone: DonutTone,
    /// Label when a prior year exists to compare against.
    pub compared_label: &'static str,
    /// Label when the selected year has no prior year.
    pub baseline_label: &'static str,
}

const CATEGORY_STYLES: [(Category, CategoryStyle); 2] = [
    (
        Category::Gain,
        CategoryStyle {
            tone: DonutTone::Green,
            compared_label: "Inbound Migration",
            baseline_label: "positive encounter amount",
        },
    ),
    (
        Category::Loss,
        CategoryStyle {
            tone: DonutTone::Red,
            compared_label: "Outbound Migration",
            baseline_label: "negative encounter amount",
        },
    ),
];

impl Category {
    pub fn style(self) -> CategoryStyle {
        CATEGORY_STYLES
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, style)| *style)
            .unwrap_or(CATEGORY_STYLES[0].1)
    }

    pub fn label(self, has_previous_year: bool) -> &'static str {
        let style = self.style();
        if has_previous_year {
            style.compared_label
        } else {
            style.baseline_label
        }
    }
}

//! Charts module - presentation-ready chart data

mod donut;
mod heatmap;
mod palette;

pub use donut::{donut_pair, DonutChart};
pub use heatmap::{heatmap_cells, HeatmapCell};
pub use palette::{
    Category, CategoryStyle, ColorTheme, DonutPalette, DonutTone, UnknownTheme, DONUT_LABEL_COLOR,
};

//! Data module - CSV loading and normalization

mod dataset;
mod loader;
mod processor;

pub use dataset::{EncounterDataset, EncounterRecord};
pub use loader::{DataLoader, LoadError, MONTH_COLUMN, TOTAL_COLUMN, YEAR_COLUMN};
pub use processor::{DataProcessor, Normalized, ParseWarning, RawRow};

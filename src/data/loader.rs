//! CSV Data Loader Module
//! Reads the encounter CSV with Polars and hands the rows to the processor.

use crate::data::{DataProcessor, EncounterDataset, RawRow};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";
pub const TOTAL_COLUMN: &str = "totalencounters";

/// Columns read past the header so that ragged rows keep their extra cells.
const OVERFLOW_COLUMNS: usize = 8;
const OVERFLOW_PREFIX: &str = "__overflow_";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("No usable data rows")]
    NoData,
}

/// Loads encounter CSV files.
pub struct DataLoader;

impl DataLoader {
    /// Load and normalize a CSV file.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<EncounterDataset, LoadError> {
        let path = path.as_ref();
        let df = Self::read_frame(path)?;
        let dataset = Self::from_frame(&df)?;

        info!(
            path = %path.display(),
            rows = df.height(),
            records = dataset.len(),
            warnings = dataset.warnings().len(),
            "loaded encounter data"
        );
        Ok(dataset)
    }

    /// Read the file with every column kept as a string.
    pub fn read_frame(path: &Path) -> Result<DataFrame, LoadError> {
        let metadata = std::fs::metadata(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        if metadata.len() == 0 {
            return Err(LoadError::NoData);
        }

        // The header pass only fixes the column names. The data pass reads a
        // few extra String columns so unquoted separators and stray cells stay
        // visible to the processor instead of failing the whole file.
        let header = Self::csv_reader(path)
            .with_has_header(true)
            .finish()?
            .collect_schema()?;
        let schema: Schema = header
            .iter_names()
            .cloned()
            .chain((0..OVERFLOW_COLUMNS).map(|i| format!("{OVERFLOW_PREFIX}{i}").into()))
            .map(|name| (name, DataType::String))
            .collect();

        let df = Self::csv_reader(path)
            .with_has_header(false)
            .with_skip_rows(1)
            .with_schema(Some(Arc::new(schema)))
            .finish()?
            .collect()?;

        debug!(columns = ?df.get_column_names(), height = df.height(), "read csv frame");
        Ok(df)
    }

    /// Every column as String, invalid UTF-8 replaced, overlong rows cut.
    fn csv_reader(path: &Path) -> LazyCsvReader {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .with_encoding(CsvEncoding::LossyUtf8)
            .with_truncate_ragged_lines(true)
            .with_ignore_errors(true)
    }

    /// Normalize an already loaded frame.
    pub fn from_frame(df: &DataFrame) -> Result<EncounterDataset, LoadError> {
        if df.height() == 0 {
            return Err(LoadError::NoData);
        }

        let years = Self::string_column(df, YEAR_COLUMN)?;
        let months = Self::string_column(df, MONTH_COLUMN)?;
        let totals = Self::string_column(df, TOTAL_COLUMN)?;
        let overflow = df
            .get_columns()
            .iter()
            .filter(|column| column.name().starts_with(OVERFLOW_PREFIX))
            .map(Self::as_strings)
            .collect::<Result<Vec<_>, _>>()?;

        let rows = (0..df.height()).map(|i| {
            RawRow::new(years.get(i), months.get(i), totals.get(i))
                .with_extra(overflow.iter().filter_map(|cells| cells.get(i)).collect())
        });

        let dataset = EncounterDataset::from_normalized(DataProcessor::normalize_rows(rows));
        if dataset.is_empty() {
            return Err(LoadError::NoData);
        }
        Ok(dataset)
    }

    /// Header names are matched trimmed and case-insensitively.
    fn find_column<'a>(df: &'a DataFrame, wanted: &str) -> Result<&'a Column, LoadError> {
        let name = df
            .get_column_names()
            .into_iter()
            .find(|name| name.trim().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| LoadError::MissingColumn(wanted.to_string()))?;

        Ok(df.column(name.as_str())?)
    }

    fn string_column(df: &DataFrame, wanted: &str) -> Result<StringChunked, LoadError> {
        Self::as_strings(Self::find_column(df, wanted)?)
    }

    fn as_strings(column: &Column) -> Result<StringChunked, LoadError> {
        let series = column.as_materialized_series().cast(&DataType::String)?;
        Ok(series.str()?.clone())
    }
}

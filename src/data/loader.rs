//! CSV Data Loader Module
//! Handles sales file loading and header validation using Polars.

use super::{NA_MARKERS, REQUIRED_COLUMNS, TOTAL_SALE};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads sales CSV files with Polars.
///
/// Every column is read as text; type coercion is left to
/// [`SalesCleaner`](super::SalesCleaner) so that bad cells turn into nulls
/// instead of failing the whole read.
pub struct SalesLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for SalesLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a sales CSV file and check that the required columns are present.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame, LoaderError> {
        let path = file_path.as_ref();
        self.file_path = Some(path.to_path_buf());
        self.df = None;

        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let null_values =
            NullValues::AllColumns(NA_MARKERS.iter().map(|m| (*m).into()).collect());

        // A zero-length inference window reads every column as String
        let mut df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_null_values(Some(null_values))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let trimmed: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        df.set_column_names(trimmed)?;

        Self::validate_columns(&df)?;

        tracing::debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded sales file"
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    fn validate_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let names = df.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|name| name.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the source already provides a Total Sale column.
    pub fn has_total_sale(&self) -> bool {
        self.columns().iter().any(|name| name == TOTAL_SALE)
    }

    /// Get the number of rows in the DataFrame.
    pub fn row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    /// Take ownership of the loaded DataFrame.
    pub fn take_dataframe(&mut self) -> Result<DataFrame, LoaderError> {
        self.df.take().ok_or(LoaderError::NoData)
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

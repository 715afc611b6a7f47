use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemperatureDataError {
    #[error("Failed to read temperature CSV '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' in '{path}' could not be read as {expected}")]
    ColumnType {
        path: PathBuf,
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Row {row} of '{path}' has a missing date")]
    MissingDate { path: PathBuf, row: usize },

    #[error("Row {row} of '{path}' has unparseable date '{value}'")]
    DateParse {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("Date {0} appears more than once")]
    DuplicateDate(chrono::NaiveDate),

    #[error("Days between {previous} and {next} are missing")]
    DateGap {
        previous: chrono::NaiveDate,
        next: chrono::NaiveDate,
    },

    #[error("No daily temperature rows found in '{0}'")]
    Empty(PathBuf),

    #[error("Cannot build a temperature frame without any days")]
    NoDays,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

use crate::temperature_data::error::TemperatureDataError;
use crate::types::daily_temperature::DailyTemperature;
use crate::types::period::Year;
use crate::types::series::TemperatureSeries;
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const DATE_COLUMN: &str = "date";

/// Reads a year of daily temperature observations from CSV.
///
/// The file must have a header row with a `date` column and the six
/// temperature columns named by [`TemperatureSeries::source_columns`].
/// Any other column, such as a leftover pandas index, is ignored.
pub struct TemperatureLoader {
    year: Year,
}

enum ParsedDay {
    Date(NaiveDate),
    /// A valid day and month that the target year does not have (29-Feb).
    NotInYear,
    Invalid,
}

impl TemperatureLoader {
    /// `year` completes dates written as `D-Mon`, e.g. `1-Jan`.
    pub fn new(year: Year) -> Self {
        Self { year }
    }

    pub fn load(&self, path: &Path) -> Result<Vec<DailyTemperature>, TemperatureDataError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| TemperatureDataError::CsvRead(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| TemperatureDataError::CsvRead(path.to_path_buf(), e))?;
        info!(
            "Read {} rows and {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        self.days_from_frame(&df, path)
    }

    /// Extracts typed rows from a raw frame, dropping the leap day when the
    /// target year has none.
    pub fn days_from_frame(
        &self,
        df: &DataFrame,
        path: &Path,
    ) -> Result<Vec<DailyTemperature>, TemperatureDataError> {
        let dates = string_column(df, DATE_COLUMN, path)?;

        let mut columns = Vec::with_capacity(6);
        for series in TemperatureSeries::ALL {
            let (low, high) = series.source_columns();
            columns.push(float_column(df, low, path)?);
            columns.push(float_column(df, high, path)?);
        }
        let value = |column: usize, row: usize| columns[column].get(row).copied().flatten();

        let mut days = Vec::with_capacity(dates.len());
        for (row, raw) in dates.iter().enumerate() {
            let raw = raw.as_deref().ok_or_else(|| TemperatureDataError::MissingDate {
                path: path.to_path_buf(),
                row,
            })?;
            let date = match self.parse_day(raw) {
                ParsedDay::Date(date) => date,
                ParsedDay::NotInYear => {
                    warn!(
                        "Dropping row {} ('{}'): no such day in {}",
                        row, raw, self.year
                    );
                    continue;
                }
                ParsedDay::Invalid => {
                    return Err(TemperatureDataError::DateParse {
                        path: path.to_path_buf(),
                        row,
                        value: raw.to_string(),
                    })
                }
            };
            days.push(DailyTemperature {
                date,
                record_low: value(0, row),
                record_high: value(1, row),
                average_low: value(2, row),
                average_high: value(3, row),
                actual_low: value(4, row),
                actual_high: value(5, row),
            });
        }

        if days.is_empty() {
            return Err(TemperatureDataError::Empty(path.to_path_buf()));
        }
        sort_consecutive(&mut days)?;
        debug!(
            "Loaded {} days from {} to {}",
            days.len(),
            days[0].date,
            days[days.len() - 1].date
        );
        Ok(days)
    }

    fn parse_day(&self, raw: &str) -> ParsedDay {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return ParsedDay::Date(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-{}", self.year), "%d-%b-%Y") {
            return ParsedDay::Date(date);
        }
        // 2000 is a leap year, so this only succeeds for 29-Feb
        if NaiveDate::parse_from_str(&format!("{raw}-2000"), "%d-%b-%Y").is_ok() {
            return ParsedDay::NotInYear;
        }
        ParsedDay::Invalid
    }
}

/// Sorts rows by date and checks they cover consecutive calendar days.
pub fn sort_consecutive(days: &mut [DailyTemperature]) -> Result<(), TemperatureDataError> {
    days.sort_by_key(|d| d.date);
    for pair in days.windows(2) {
        let (previous, next) = (pair[0].date, pair[1].date);
        if next == previous {
            return Err(TemperatureDataError::DuplicateDate(previous));
        }
        if previous.succ_opt() != Some(next) {
            return Err(TemperatureDataError::DateGap { previous, next });
        }
    }
    Ok(())
}

fn require<'a>(
    df: &'a DataFrame,
    name: &str,
    path: &Path,
) -> Result<&'a Column, TemperatureDataError> {
    df.column(name)
        .map_err(|_| TemperatureDataError::MissingColumn {
            path: PathBuf::from(path),
            column: name.to_string(),
        })
}

fn string_column(
    df: &DataFrame,
    name: &str,
    path: &Path,
) -> Result<Vec<Option<String>>, TemperatureDataError> {
    let type_error = |source| TemperatureDataError::ColumnType {
        path: path.to_path_buf(),
        column: name.to_string(),
        expected: "text",
        source,
    };
    let column = require(df, name, path)?
        .cast(&DataType::String)
        .map_err(type_error)?;
    let values = column.str().map_err(type_error)?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn float_column(
    df: &DataFrame,
    name: &str,
    path: &Path,
) -> Result<Vec<Option<f64>>, TemperatureDataError> {
    let type_error = |source| TemperatureDataError::ColumnType {
        path: path.to_path_buf(),
        column: name.to_string(),
        expected: "a number",
        source,
    };
    let column = require(df, name, path)?
        .cast(&DataType::Float64)
        .map_err(type_error)?;
    let values = column.f64().map_err(type_error)?;
    Ok(values.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temperature_data::test_support::{nyc_style_csv, write_csv};

    #[test]
    fn test_load_drops_leap_day_and_index_columns() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&nyc_style_csv(true))?;
        let days = TemperatureLoader::new(Year(2015)).load(file.path())?;

        assert_eq!(days.len(), 365);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(days[58].date, NaiveDate::from_ymd_opt(2015, 2, 28).unwrap());
        assert_eq!(days[59].date, NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());
        assert_eq!(days[364].date, NaiveDate::from_ymd_opt(2015, 12, 31).unwrap());
        assert!(days.iter().all(|d| d.record_high.is_some() && d.actual_low.is_some()));
        Ok(())
    }

    #[test]
    fn test_load_keeps_leap_day_in_leap_year() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(&nyc_style_csv(true))?;
        let days = TemperatureLoader::new(Year(2016)).load(file.path())?;
        assert_eq!(days.len(), 366);
        assert_eq!(days[59].date, NaiveDate::from_ymd_opt(2016, 2, 29).unwrap());
        Ok(())
    }

    #[test]
    fn test_iso_dates_and_missing_values() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "date,recHigh,recLow,avgHigh,avgLow,max,min\n\
                   2015-01-02,60,-5,39,27,41,30\n\
                   2015-01-01,62,-4,39,27,,33\n";
        let file = write_csv(csv)?;
        let days = TemperatureLoader::new(Year(2015)).load(file.path())?;

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(days[0].actual_high, None);
        assert_eq!(days[0].actual_low, Some(33.0));
        assert_eq!(days[1].record_low, Some(-5.0));
        Ok(())
    }

    #[test]
    fn test_missing_column_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "date,recHigh,recLow,avgHigh,avgLow,max\n1-Jan,60,-5,39,27,41\n";
        let file = write_csv(csv)?;
        let err = TemperatureLoader::new(Year(2015))
            .load(file.path())
            .unwrap_err();
        match err {
            TemperatureDataError::MissingColumn { column, .. } => assert_eq!(column, "min"),
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_bad_date_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "date,recHigh,recLow,avgHigh,avgLow,max,min\n\
                   1-Jan,60,-5,39,27,41,30\n\
                   Someday,60,-5,39,27,41,30\n";
        let file = write_csv(csv)?;
        let err = TemperatureLoader::new(Year(2015))
            .load(file.path())
            .unwrap_err();
        match err {
            TemperatureDataError::DateParse { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "Someday");
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[test]
    fn test_duplicate_dates_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "date,recHigh,recLow,avgHigh,avgLow,max,min\n\
                   1-Jan,60,-5,39,27,41,30\n\
                   2015-01-01,60,-5,39,27,41,30\n";
        let file = write_csv(csv)?;
        let err = TemperatureLoader::new(Year(2015))
            .load(file.path())
            .unwrap_err();
        assert!(matches!(err, TemperatureDataError::DuplicateDate(_)));
        Ok(())
    }

    #[test]
    fn test_missing_day_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "date,recHigh,recLow,avgHigh,avgLow,max,min\n\
                   2015-01-01,60,-5,39,27,41,30\n\
                   2015-01-02,60,-5,39,27,41,30\n\
                   2015-01-04,60,-5,39,27,41,30\n";
        let file = write_csv(csv)?;
        let err = TemperatureLoader::new(Year(2015))
            .load(file.path())
            .unwrap_err();
        match err {
            TemperatureDataError::DateGap { previous, next } => {
                assert_eq!(previous, NaiveDate::from_ymd_opt(2015, 1, 2).unwrap());
                assert_eq!(next, NaiveDate::from_ymd_opt(2015, 1, 4).unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }
}

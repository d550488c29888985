//! Time series data handling: extraction of a single numeric value column
//! (and an optional date-label column) from tabular input.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Time series data structure for forecasting
#[derive(Debug, Clone)]
pub struct TimeSeriesData {
    /// Data frame containing the time series data
    df: DataFrame,
    /// Name of the value column to forecast
    value_column: String,
    /// Name of the date/label column, if any
    date_column: Option<String>,
}

/// Data loader for time series data
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load time series data from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesData> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::detect_and_create_time_series(df)
    }

    /// Create time series data from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<TimeSeriesData> {
        Self::detect_and_create_time_series(df)
    }

    /// Detect date and value columns in a DataFrame and create TimeSeriesData
    fn detect_and_create_time_series(df: DataFrame) -> Result<TimeSeriesData> {
        let date_column = Self::detect_date_column(&df);
        let value_column = Self::detect_value_column(&df, date_column.as_deref())?;

        Ok(TimeSeriesData {
            df,
            value_column,
            date_column,
        })
    }

    /// Detect the date/label column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Option<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date")
                || lower_name.contains("time")
                || lower_name.contains("timestamp")
            {
                return Some(name.to_string());
            }
        }

        // Fall back to the first temporal column
        df.get_columns()
            .iter()
            .find(|col| col.dtype().is_temporal())
            .map(|col| col.name().to_string())
    }

    /// Detect the value column: the first numeric column that is not the date column
    fn detect_value_column(df: &DataFrame, date_column: Option<&str>) -> Result<String> {
        for col in df.get_columns() {
            if Some(col.name()) == date_column {
                continue;
            }
            if col.dtype().is_numeric() {
                return Ok(col.name().to_string());
            }
        }

        Err(ForecastError::DataError(
            "No numeric value column found in data".to_string(),
        ))
    }
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData with explicit column names
    pub fn with_columns(
        df: DataFrame,
        value_column: &str,
        date_column: Option<&str>,
    ) -> Result<Self> {
        if df.column(value_column).is_err() {
            return Err(ForecastError::DataError(format!(
                "Value column '{}' not found in data",
                value_column
            )));
        }
        if let Some(date_col) = date_column {
            if df.column(date_col).is_err() {
                return Err(ForecastError::DataError(format!(
                    "Date column '{}' not found in data",
                    date_col
                )));
            }
        }

        Ok(Self {
            df,
            value_column: value_column.to_string(),
            date_column: date_column.map(|c| c.to_string()),
        })
    }

    /// Create a new TimeSeriesData from raw values (for testing and direct use)
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let values_series = Series::new("value", values);
        let df = DataFrame::new(vec![values_series])?;

        Ok(Self {
            df,
            value_column: "value".to_string(),
            date_column: None,
        })
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the value column name
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Get the date column name, if any
    pub fn date_column(&self) -> Option<&str> {
        self.date_column.as_deref()
    }

    /// Get the observed values as a vector, coercing any numeric dtype to f64.
    /// Null entries are dropped so downstream models only see numeric points.
    pub fn values(&self) -> Vec<f64> {
        let col = match self.df.column(&self.value_column) {
            Ok(col) => col,
            Err(_) => return Vec::new(),
        };

        match col.dtype() {
            DataType::Float64 => col.f64().unwrap().into_iter().flatten().collect(),
            DataType::Float32 => col
                .f32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::Int64 => col
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::Int32 => col
                .i32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::UInt64 => col
                .u64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            DataType::UInt32 => col
                .u32()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Get date labels for the rows, rendered as text, parallel to
    /// [`TimeSeriesData::values`].
    ///
    /// String columns are passed through; temporal columns are formatted as
    /// `YYYY-MM-DD`, scaled by the column's time unit. Rows whose value is
    /// null are skipped so `labels[i]` always describes `values()[i]`; a
    /// null or unrenderable label cell becomes an empty string. Returns
    /// `None` when no date column was detected.
    pub fn date_labels(&self) -> Option<Vec<String>> {
        let date_col = self.date_column.as_ref()?;
        let col = self.df.column(date_col).ok()?;

        // One entry per row, keeping gaps so rows stay aligned with the
        // value column below
        let per_row: Vec<Option<String>> = match col.dtype() {
            DataType::Utf8 => col
                .utf8()
                .ok()?
                .into_iter()
                .map(|s| s.map(|s| s.to_string()))
                .collect(),
            DataType::Datetime(unit, _) => {
                let unit = *unit;
                col.datetime()
                    .ok()?
                    .into_iter()
                    .map(|ts| ts.and_then(|ts| datetime_label(ts, unit)))
                    .collect()
            }
            DataType::Date => col
                .date()
                .ok()?
                .into_iter()
                .map(|days| {
                    days.and_then(|days| {
                        chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
                            .and_then(|epoch| {
                                epoch.checked_add_days(chrono::Days::new(days as u64))
                            })
                            .map(|naive| naive.format("%Y-%m-%d").to_string())
                    })
                })
                .collect(),
            _ => return None,
        };

        let value_col = self.df.column(&self.value_column).ok()?;
        let keep = value_col.is_not_null();

        Some(
            per_row
                .into_iter()
                .zip(keep.into_iter())
                .filter(|(_, keep)| keep.unwrap_or(false))
                .map(|(label, _)| label.unwrap_or_default())
                .collect(),
        )
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the length of the time series
    pub fn len(&self) -> usize {
        self.df.height()
    }
}

/// Render a raw datetime value as `YYYY-MM-DD`, honouring the column's
/// time unit
fn datetime_label(ts: i64, unit: TimeUnit) -> Option<String> {
    let (secs, nanos) = match unit {
        TimeUnit::Nanoseconds => (ts.div_euclid(1_000_000_000), ts.rem_euclid(1_000_000_000)),
        TimeUnit::Microseconds => (ts.div_euclid(1_000_000), ts.rem_euclid(1_000_000) * 1_000),
        TimeUnit::Milliseconds => (ts.div_euclid(1_000), ts.rem_euclid(1_000) * 1_000_000),
    };

    NaiveDateTime::from_timestamp_opt(secs, nanos as u32).map(|naive| {
        DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
            .format("%Y-%m-%d")
            .to_string()
    })
}

//! Time Series Table Module
//! Read-only view over the loaded DataFrame: column 0 is time, the rest are traces.

use polars::prelude::*;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column {index} out of range ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}

/// Simulation output table. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct TimeSeriesTable {
    df: DataFrame,
    /// Header text as written in the file. Polars renames duplicates, these do not.
    headers: Vec<String>,
}

impl TimeSeriesTable {
    pub fn new(df: DataFrame) -> Self {
        let headers = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self { df, headers }
    }

    /// Table whose headers are kept verbatim instead of taken from the DataFrame.
    pub fn with_headers(df: DataFrame, headers: Vec<String>) -> Self {
        debug_assert_eq!(df.width(), headers.len());
        Self { df, headers }
    }

    /// Column headers in file order.
    pub fn headers(&self) -> Vec<String> {
        self.headers.clone()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Header of the time column, if the table has any columns at all.
    pub fn time_header(&self) -> Option<String> {
        self.headers().into_iter().next()
    }

    /// Index and header of every column after the time column.
    pub fn value_columns(&self) -> Vec<(usize, String)> {
        self.headers().into_iter().enumerate().skip(1).collect()
    }

    /// Column values as `f64`.
    ///
    /// Missing, non-numeric and NaN entries come back as `None`.
    pub fn values(&self, index: usize) -> Result<Vec<Option<f64>>, TableError> {
        let column = self
            .df
            .get_columns()
            .get(index)
            .ok_or(TableError::ColumnOutOfRange {
                index,
                count: self.column_count(),
            })?;

        let value_f64 = column.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        Ok(value_ca
            .into_iter()
            .map(|v| v.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Get a reference to the underlying DataFrame.
    #[cfg(test)]
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}

impl fmt::Display for TimeSeriesTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimeSeriesTable {
        let df = DataFrame::new(vec![
            Column::new("t".into(), vec![0.0, 0.5, 1.0]),
            Column::new("SO".into(), vec![-60.0, f64::NAN, -40.0]),
            Column::new("N1M".into(), vec![1i64, 2, 3]),
        ])
        .unwrap();
        TimeSeriesTable::new(df)
    }

    #[test]
    fn time_column_is_not_a_value_column() {
        let table = sample();

        assert_eq!(table.time_header().as_deref(), Some("t"));
        assert_eq!(
            table.value_columns(),
            vec![(1, "SO".to_string()), (2, "N1M".to_string())]
        );
    }

    #[test]
    fn values_cast_integers_and_drop_nan() {
        let table = sample();

        assert_eq!(
            table.values(1).unwrap(),
            vec![Some(-60.0), None, Some(-40.0)]
        );
        assert_eq!(
            table.values(2).unwrap(),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn out_of_range_column_is_an_error() {
        let err = sample().values(3).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnOutOfRange { index: 3, count: 3 }
        ));
    }

    #[test]
    fn display_lists_every_header() {
        let dump = sample().to_string();
        for header in ["t", "SO", "N1M"] {
            assert!(dump.contains(header), "missing {header} in\n{dump}");
        }
    }
}

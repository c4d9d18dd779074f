//! Time Series Loader Module
//! Reads whitespace-delimited simulation output into a table using Polars.

use crate::data::TimeSeriesTable;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse table: {0}")]
    Parse(#[from] PolarsError),
    #[error("No header line found")]
    Empty,
    #[error("Line {line}: expected {expected} fields, saw {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Loads simulation output files whose fields are separated by runs of whitespace.
pub struct DataLoader;

impl DataLoader {
    /// Read and parse a file from disk.
    pub fn load_table(path: impl AsRef<Path>) -> Result<TimeSeriesTable, LoaderError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::parse_table(&text)?;
        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            time = table.time_header().as_deref().unwrap_or_default(),
            "loaded time series table"
        );
        Ok(table)
    }

    /// Parse file contents already held in memory.
    pub fn parse_table(text: &str) -> Result<TimeSeriesTable, LoaderError> {
        let (headers, normalized) = Self::normalize_fields(text)?;

        // Polars only splits on a single byte, so runs of whitespace are
        // collapsed to one tab first. Types are inferred over the whole file.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|opts| opts.with_separator(b'\t').with_quote_char(None))
            .into_reader_with_file_handle(Cursor::new(normalized.into_bytes()))
            .finish()?;

        Ok(TimeSeriesTable::with_headers(Self::numeric_as_float(df)?, headers))
    }

    /// Cast integer columns to `Float64` so every numeric field is a float.
    fn numeric_as_float(df: DataFrame) -> Result<DataFrame, LoaderError> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| {
                if matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                ) {
                    col.cast(&DataType::Float64)
                } else {
                    Ok(col.clone())
                }
            })
            .collect::<PolarsResult<Vec<Column>>>()?;

        Ok(DataFrame::new(columns)?)
    }

    /// Rewrite every non-blank line as tab-separated fields, padding short rows.
    ///
    /// Returns the header fields verbatim alongside the rewritten text.
    fn normalize_fields(text: &str) -> Result<(Vec<String>, String), LoaderError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, fields)| !fields.is_empty());

        let Some((_, headers)) = lines.next() else {
            return Err(LoaderError::Empty);
        };
        let expected = headers.len();

        let mut out = headers.join("\t");
        out.push('\n');

        for (line, mut fields) in lines {
            if fields.len() > expected {
                return Err(LoaderError::RaggedRow {
                    line,
                    expected,
                    found: fields.len(),
                });
            }
            fields.resize(expected, "");
            out.push_str(&fields.join("\t"));
            out.push('\n');
        }

        let headers = headers.into_iter().map(str::to_string).collect();
        Ok((headers, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_headers_and_rows_from_disk() {
        let file = write_fixture("t v1 v2\n0.0 -60.1 -55.0\n0.1 -59.8 -54.2\n0.2 -20.5 -53.9\n");

        let table = DataLoader::load_table(file.path()).unwrap();

        assert_eq!(table.headers(), vec!["t", "v1", "v2"]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.values(2).unwrap(),
            vec![Some(-55.0), Some(-54.2), Some(-53.9)]
        );
    }

    #[test]
    fn splits_on_runs_of_mixed_whitespace() {
        let table = DataLoader::parse_table("  time \t N1M   N2v\n0\t  1.5    2\n1   -3 \t\t4.25  \n")
            .unwrap();

        assert_eq!(table.headers(), vec!["time", "N1M", "N2v"]);
        assert_eq!(table.values(1).unwrap(), vec![Some(1.5), Some(-3.0)]);
        assert_eq!(table.values(2).unwrap(), vec![Some(2.0), Some(4.25)]);
    }

    #[test]
    fn skips_blank_lines() {
        let table = DataLoader::parse_table("\n\nt v\n\n1 2\n   \n3 4\n").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.values(0).unwrap(), vec![Some(1.0), Some(3.0)]);
    }

    #[test]
    fn keeps_text_fields_as_strings() {
        let table = DataLoader::parse_table("t state\n0 rest\n1 burst\n").unwrap();
        let column = &table.dataframe().get_columns()[1];

        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(table.values(1).unwrap(), vec![None, None]);
    }

    #[test]
    fn pads_short_rows_with_missing_values() {
        let table = DataLoader::parse_table("t a b\n0 1 2\n1 3\n").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.values(2).unwrap(), vec![Some(2.0), None]);
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let err = DataLoader::parse_table("t a\n0 1\n1 2 3\n").unwrap_err();

        match err {
            LoaderError::RaggedRow {
                line,
                expected,
                found,
            } => {
                assert_eq!((line, expected, found), (3, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn integer_fields_load_as_floats() {
        let table = DataLoader::parse_table("t v\n0 1\n1 2\n").unwrap();
        let dtypes: Vec<_> = table
            .dataframe()
            .get_columns()
            .iter()
            .map(|c| c.dtype().clone())
            .collect();

        assert_eq!(dtypes, vec![DataType::Float64, DataType::Float64]);
    }

    #[test]
    fn late_decimal_after_long_integer_run() {
        let mut text = String::from("t v\n");
        for i in 0..=10000 {
            text.push_str(&format!("{i} 0\n"));
        }
        text.push_str("10001 -60.5\n");

        let table = DataLoader::parse_table(&text).unwrap();
        let values = table.values(1).unwrap();

        assert_eq!(table.row_count(), 10002);
        assert_eq!(values[0], Some(0.0));
        assert_eq!(values[10001], Some(-60.5));
    }

    #[test]
    fn quotes_are_plain_characters() {
        let table = DataLoader::parse_table("t \"v\n0 1\n1 2\n").unwrap();

        assert_eq!(table.headers(), vec!["t", "\"v"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.values(1).unwrap(), vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn duplicate_headers_stay_verbatim() {
        let table = DataLoader::parse_table("t v v\n0 1 2\n1 3 4\n").unwrap();

        assert_eq!(table.headers(), vec!["t", "v", "v"]);
        assert_eq!(table.values(2).unwrap(), vec![Some(2.0), Some(4.0)]);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            DataLoader::parse_table(" \n\n"),
            Err(LoaderError::Empty)
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.dat");

        let err = DataLoader::load_table(&path).unwrap_err();

        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("absent.dat"));
    }
}

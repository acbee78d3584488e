//! Data Loader Module
//! Reads entries/exits data points from CSV (via Polars) or JSON files.

use crate::data::DataPoint;
use log::{debug, info};
use polars::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Column names matched case-insensitively before falling back to position.
const LABEL_COL: &str = "label";
const ENTRIES_COL: &str = "entries";
const EXITS_COL: &str = "exits";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Expected at least 3 columns (label, entries, exits), found {0}")]
    MissingColumns(usize),
    #[error("Row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: String },
    #[error("Row {row}: invalid value {value} in column '{column}' (must be finite and non-negative)")]
    InvalidValue {
        row: usize,
        column: String,
        value: f64,
    },
    #[error("Row {row}: '{text}' in column '{column}' is not a number")]
    NotANumber {
        row: usize,
        column: String,
        text: String,
    },
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

/// Loads data points from files on disk.
pub struct DataLoader;

impl DataLoader {
    /// Load a file, choosing the parser from its extension.
    pub fn load(path: &Path) -> Result<Vec<DataPoint>, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Self::load_csv(path),
            "json" => Self::load_json(path),
            other => Err(LoaderError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Load a CSV file using Polars.
    ///
    /// Columns named `label`, `entries` and `exits` are used when all three
    /// exist; otherwise the first three columns are taken in that order.
    pub fn load_csv(path: &Path) -> Result<Vec<DataPoint>, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let points = Self::points_from_dataframe(&df)?;
        info!("Loaded {} data points from {}", points.len(), path.display());
        Ok(points)
    }

    /// Load a JSON array of `{ "label", "entries", "exits" }` objects.
    pub fn load_json(path: &Path) -> Result<Vec<DataPoint>, LoaderError> {
        let reader = BufReader::new(File::open(path)?);
        let points: Vec<DataPoint> = serde_json::from_reader(reader)?;

        for (i, point) in points.iter().enumerate() {
            Self::check_value(i + 1, ENTRIES_COL, point.entries)?;
            Self::check_value(i + 1, EXITS_COL, point.exits)?;
        }

        info!("Loaded {} data points from {}", points.len(), path.display());
        Ok(points)
    }

    /// Convert a loaded DataFrame into data points.
    pub fn points_from_dataframe(df: &DataFrame) -> Result<Vec<DataPoint>, LoaderError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (label_col, entries_col, exits_col) = Self::resolve_columns(&columns)?;
        debug!(
            "Using columns label='{}', entries='{}', exits='{}'",
            label_col, entries_col, exits_col
        );

        let labels = df.column(&label_col)?.cast(&DataType::String)?;
        let labels = labels.str()?;
        let entries = Self::numeric_column(df, &entries_col)?;
        let entries = entries.f64()?;
        let exits = Self::numeric_column(df, &exits_col)?;
        let exits = exits.f64()?;

        let mut points = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let row = i + 1;
            let label = labels.get(i).ok_or_else(|| LoaderError::MissingValue {
                row,
                column: label_col.clone(),
            })?;
            let entry = entries.get(i).ok_or_else(|| LoaderError::MissingValue {
                row,
                column: entries_col.clone(),
            })?;
            let exit = exits.get(i).ok_or_else(|| LoaderError::MissingValue {
                row,
                column: exits_col.clone(),
            })?;

            Self::check_value(row, &entries_col, entry)?;
            Self::check_value(row, &exits_col, exit)?;

            points.push(DataPoint::new(label, entry, exit));
        }

        Ok(points)
    }

    /// Cast a column to Float64, reporting cells the cast turned into nulls.
    fn numeric_column(df: &DataFrame, name: &str) -> Result<Column, LoaderError> {
        let raw = df.column(name)?;
        let cast = raw.cast(&DataType::Float64)?;
        if cast.null_count() > raw.null_count() {
            for i in 0..raw.len() {
                let original = raw.get(i)?;
                if !original.is_null() && cast.get(i)?.is_null() {
                    return Err(LoaderError::NotANumber {
                        row: i + 1,
                        column: name.to_string(),
                        text: original.to_string().trim_matches('"').to_string(),
                    });
                }
            }
        }
        Ok(cast)
    }

    /// Pick label/entries/exits columns by name, or by position as a fallback.
    fn resolve_columns(columns: &[String]) -> Result<(String, String, String), LoaderError> {
        let find = |wanted: &str| {
            columns
                .iter()
                .find(|c| c.trim().eq_ignore_ascii_case(wanted))
                .cloned()
        };

        if let (Some(label), Some(entries), Some(exits)) =
            (find(LABEL_COL), find(ENTRIES_COL), find(EXITS_COL))
        {
            return Ok((label, entries, exits));
        }

        match columns {
            [label, entries, exits, ..] => Ok((label.clone(), entries.clone(), exits.clone())),
            _ => Err(LoaderError::MissingColumns(columns.len())),
        }
    }

    fn check_value(row: usize, column: &str, value: f64) -> Result<(), LoaderError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(LoaderError::InvalidValue {
                row,
                column: column.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_csv_by_column_name() {
        let file = write_temp(".csv", "exits,Label,entries\n380,Jan,450\n420,Feb,520\n");

        let points = DataLoader::load(file.path()).unwrap();
        assert_eq!(
            points,
            vec![
                DataPoint::new("Jan", 450.0, 380.0),
                DataPoint::new("Feb", 520.0, 420.0),
            ]
        );
    }

    #[test]
    fn loads_csv_by_position() {
        let file = write_temp(".csv", "month,in,out\nMar,480,390\n");

        let points = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(points, vec![DataPoint::new("Mar", 480.0, 390.0)]);
    }

    #[test]
    fn rejects_csv_with_two_columns() {
        let file = write_temp(".csv", "month,in\nMar,480\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumns(2)));
    }

    #[test]
    fn rejects_negative_csv_value() {
        let file = write_temp(".csv", "label,entries,exits\nJan,450,-1\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        match err {
            LoaderError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "exits");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_csv_value() {
        let file = write_temp(".csv", "label,entries,exits\nJan,450,380\nFeb,,420\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { row: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_csv_value() {
        let file = write_temp(".csv", "label,entries,exits\nJan,450,380\nFeb,abc,420\n");

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        match err {
            LoaderError::NotANumber { row, column, text } => {
                assert_eq!(row, 2);
                assert_eq!(column, "entries");
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loads_json_array() {
        let file = write_temp(
            ".json",
            r#"[{"label":"Jan","entries":450,"exits":380},{"label":"Feb","entries":520,"exits":420}]"#,
        );

        let points = DataLoader::load(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], DataPoint::new("Feb", 520.0, 420.0));
    }

    #[test]
    fn rejects_negative_json_value() {
        let file = write_temp(".json", r#"[{"label":"Jan","entries":-5,"exits":380}]"#);

        let err = DataLoader::load_json(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidValue { row: 1, .. }));
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".txt", "Jan 450 380");

        let err = DataLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(ext) if ext == "txt"));
    }
}

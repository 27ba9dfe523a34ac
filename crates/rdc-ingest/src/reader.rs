//! Raw batch readers.
//!
//! CSV files are read with every column as text: cleaning decides what a
//! value means, not the reader. JSON arrays of objects keep numbers as
//! numbers when a whole column is numeric.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Supported raw input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Read a raw batch, choosing the reader by extension.
pub fn read_batch(path: &Path) -> Result<DataFrame> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv_batch(path),
        InputFormat::Json => read_json_batch(path),
    }
}

/// Read a CSV file with a header row; all columns are strings.
pub fn read_csv_batch(path: &Path) -> Result<DataFrame> {
    ensure_exists(path)?;
    let csv_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)?;

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read CSV batch");
    Ok(df)
}

/// Read a JSON array of flat objects.
///
/// Columns appear in first-seen key order. Missing keys are null. A column
/// whose non-null values are all numbers becomes `Float64`; anything else is
/// rendered as text.
pub fn read_json_batch(path: &Path) -> Result<DataFrame> {
    ensure_exists(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let df = json_records_to_frame(&text, path)?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "read JSON batch");
    Ok(df)
}

fn json_records_to_frame(text: &str, path: &Path) -> Result<DataFrame> {
    let shape_error = |reason: &str| IngestError::JsonShape {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(shape_error("top level is not an array"));
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => records.push(map),
            _ => return Err(shape_error("array element is not an object")),
        }
    }

    let mut names: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let cells: Vec<Option<&Value>> = records
            .iter()
            .map(|record| record.get(name).filter(|v| !v.is_null()))
            .collect();
        let numeric = cells.iter().flatten().all(|v| v.is_number());
        let column = if numeric {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(Value::as_f64))
                .collect();
            Column::new(name.as_str().into(), values)
        } else {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.map(json_cell_text))
                .collect();
            Column::new(name.as_str().into(), values)
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

fn json_cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Default output path: `<stem>.clean.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("batch");
    input.with_file_name(format!("{stem}.clean.csv"))
}

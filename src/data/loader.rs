use std::io;
use std::path::Path;

use super::model::{Row, Table, Value};
use crate::error::CleanError;
use crate::logging::RunLog;

/// Strings Pandas reads as missing by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV file into a [`Table`], typing each cell from its text.
///
/// Fails with [`CleanError::NotFound`] when `path` does not exist and
/// [`CleanError::Load`] for anything else that prevents parsing.
pub fn load_csv(path: &Path, log: &RunLog) -> Result<Table, CleanError> {
    match read_table(path) {
        Ok(table) => {
            log.info(format_args!("Data loaded successfully."));
            Ok(table)
        }
        Err(err) => {
            match &err {
                CleanError::NotFound { path } => {
                    log.error(format_args!("The file {} was not found.", path.display()))
                }
                other => log.error(format_args!(
                    "An error occurred while loading the data: {other}"
                )),
            }
            Err(err)
        }
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Layout: one header row, then one record per row. Every record must have
/// as many fields as the header.
fn read_table(path: &Path) -> Result<Table, CleanError> {
    let load_err = |message: String| CleanError::Load {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| open_error(path, e))?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| load_err(format!("reading CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    if columns.iter().all(String::is_empty) {
        return Err(load_err("no columns to parse from file".to_string()));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| load_err(format!("CSV row {index}: {e}")))?;
        rows.push(Row::new(index, record.iter().map(guess_value).collect()));
    }

    let mut table = Table::new(columns, rows);
    table.unify_numeric_columns();
    Ok(table)
}

fn open_error(path: &Path, err: csv::Error) -> CleanError {
    if let csv::ErrorKind::Io(io_err) = err.kind() {
        if io_err.kind() == io::ErrorKind::NotFound {
            return CleanError::NotFound {
                path: path.to_path_buf(),
            };
        }
    }
    CleanError::Load {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn guess_value(s: &str) -> Value {
    if NA_TOKENS.contains(&s) {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // Spellings like "NAN" parse but are still missing values.
        return if f.is_nan() { Value::Null } else { Value::Float(f) };
    }
    match s {
        "True" | "true" | "TRUE" => Value::Bool(true),
        "False" | "false" | "FALSE" => Value::Bool(false),
        _ => Value::String(s.to_string()),
    }
}

use super::stats::Fence;
use crate::data::filter::{format_indices, partition_rows};
use crate::data::model::{Table, Value};
use crate::error::CleanError;
use crate::logging::RunLog;

/// Drop rows whose `population` lies strictly outside the Tukey fence
/// `[Q1 - k·IQR, Q3 + k·IQR]`, where `k` is `multiplier`.
///
/// Rows with a null or non-numeric `population` are not compared and stay.
pub fn correct_outliers(
    table: &Table,
    multiplier: f64,
    log: &RunLog,
) -> Result<Table, CleanError> {
    let col = table.require_column("population")?;
    let values: Vec<f64> = table.column_values(col).filter_map(Value::as_f64).collect();
    let fence = Fence::from_values(&values, multiplier).ok_or_else(|| CleanError::MissingColumn {
        column: "population".to_string(),
    })?;

    let part = partition_rows(table, |row| {
        row.values[col].as_f64().map_or(true, |v| fence.contains(v))
    });

    log.info(format_args!(
        "Population fence [{}, {}] from Q1 = {}, Q3 = {}, IQR = {}",
        fence.lower,
        fence.upper,
        fence.q1,
        fence.q3,
        fence.iqr()
    ));
    log.info(format_args!(
        "Outlier rows identified at indices: {}",
        format_indices(&part.removed)
    ));
    log.info(format_args!(
        "Total outliers removed: {}",
        part.removed_count()
    ));
    Ok(part.kept)
}

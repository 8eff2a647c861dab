//! The fixed cleaning pipeline.
//!
//! ```text
//!   Table ─► duplicates ─► missing ─► outliers ─► dtypes ─► future_dates ─► Table
//!                                                       (─► duplicates, if configured)
//! ```
//!
//! Every stage borrows its input and returns a new [`Table`], so each one can
//! be run and tested on its own.

pub mod dtypes;
pub mod duplicates;
pub mod future_dates;
pub mod missing;
pub mod outliers;
pub mod stats;

use crate::config::CleaningConfig;
use crate::data::model::{Table, Value};
use crate::error::CleanError;
use crate::logging::RunLog;

/// Run every stage in order. The first failing stage aborts the run.
pub fn run(
    table: &Table,
    config: &CleaningConfig,
    current_year: i32,
    log: &RunLog,
) -> Result<Table, CleanError> {
    let table = duplicates::remove_duplicates(table, log);
    let table = logged(
        "Handling missing values",
        missing::handle_missing_values(&table, config.missing_year_policy, log),
        log,
    )?;
    let table = logged(
        "Correcting outliers",
        outliers::correct_outliers(&table, config.iqr_multiplier, log),
        log,
    )?;
    let table = logged(
        "Fixing data types",
        dtypes::fix_data_types(
            &table,
            config.normalize_year_policy,
            config.negative_population_policy,
            log,
        ),
        log,
    )?;
    let table = logged(
        "Filtering future dates",
        future_dates::filter_future_dates(
            &table,
            current_year,
            config.min_plausible_year,
            config.year_placeholder(),
            config.placeholder_year_policy,
            log,
        ),
        log,
    )?;
    if config.dedup_after_cleaning {
        Ok(duplicates::remove_duplicates(&table, log))
    } else {
        Ok(table)
    }
}

fn logged(stage: &str, result: Result<Table, CleanError>, log: &RunLog) -> Result<Table, CleanError> {
    if let Err(err) = &result {
        log.error(format_args!("{stage} failed: {err}"));
    }
    result
}

/// Cast an already-coerced numeric cell to `i64`, truncating toward zero.
/// `Ok(None)` for null (or anything non-numeric).
pub(crate) fn cast_integer(column: &str, value: &Value) -> Result<Option<i64>, CleanError> {
    match value {
        Value::Integer(i) => Ok(Some(*i)),
        Value::Float(f) => {
            let truncated = f.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
                Ok(Some(truncated as i64))
            } else {
                Err(CleanError::IntegerCast {
                    column: column.to_string(),
                    value: *f,
                })
            }
        }
        _ => Ok(None),
    }
}

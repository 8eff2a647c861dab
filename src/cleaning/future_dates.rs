use crate::config::PlaceholderYearPolicy;
use crate::data::filter::{format_indices, partition_rows};
use crate::data::model::Table;
use crate::error::CleanError;
use crate::logging::RunLog;

/// Keep rows whose `year` is at most `current_year` and, when `min_year` is
/// set, at least `min_year`.
///
/// A null or non-numeric `year` fails the comparison and is dropped. Rows
/// carrying `placeholder` are dropped only under [`PlaceholderYearPolicy::Drop`];
/// `min_year` does not apply to them.
pub fn filter_future_dates(
    table: &Table,
    current_year: i32,
    min_year: Option<i64>,
    placeholder: Option<i64>,
    policy: PlaceholderYearPolicy,
    log: &RunLog,
) -> Result<Table, CleanError> {
    let col = table.require_column("year")?;
    let current = f64::from(current_year);
    let is_placeholder = |year: f64| placeholder.is_some_and(|p| year == p as f64);
    let keep_year = |year: f64| {
        if year > current {
            false
        } else if is_placeholder(year) {
            policy == PlaceholderYearPolicy::Retain
        } else {
            min_year.map_or(true, |min| year >= min as f64)
        }
    };

    let future: Vec<usize> = table
        .rows
        .iter()
        .filter(|row| row.values[col].as_f64().is_some_and(|y| y > current))
        .map(|row| row.index)
        .collect();
    let part = partition_rows(table, |row| row.values[col].as_f64().is_some_and(|y| keep_year(y)));

    log.info(format_args!(
        "Future date rows identified at indices: {}",
        format_indices(&future)
    ));
    if let Some(min) = min_year {
        let too_old: Vec<usize> = table
            .rows
            .iter()
            .filter(|row| {
                row.values[col]
                    .as_f64()
                    .is_some_and(|y| y < min as f64 && !is_placeholder(y))
            })
            .map(|row| row.index)
            .collect();
        log.info(format_args!(
            "Rows with years before {min} identified at indices: {}",
            format_indices(&too_old)
        ));
    }
    log.info(format_args!(
        "Total future date rows removed: {}",
        part.removed_count()
    ));
    Ok(part.kept)
}

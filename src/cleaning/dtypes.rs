use std::collections::BTreeSet;

use super::cast_integer;
use crate::config::{NegativePopulationPolicy, YearNullPolicy};
use crate::data::model::{Row, Table, Value};
use crate::error::CleanError;
use crate::logging::RunLog;

/// Coerce `year` and `population` to integers and `gender` to a category.
///
/// Dtype summaries and coercion warnings go to stdout. A `year` that does
/// not survive coercion is resolved by `year_policy`; a `population` that
/// does not becomes `0`, and a negative one is resolved by
/// `negative_population`. Failures are printed before being returned.
pub fn fix_data_types(
    table: &Table,
    year_policy: YearNullPolicy,
    negative_population: NegativePopulationPolicy,
    log: &RunLog,
) -> Result<Table, CleanError> {
    println!("Initial data types:\n{}", dtype_summary(table));

    match convert(table, year_policy, negative_population, log) {
        Ok(converted) => {
            println!("Updated data types:\n{}", dtype_summary(&converted));
            Ok(converted)
        }
        Err(err) => {
            println!("Failed to convert data types: {err}");
            Err(err)
        }
    }
}

fn convert(
    table: &Table,
    year_policy: YearNullPolicy,
    negative_population: NegativePopulationPolicy,
    log: &RunLog,
) -> Result<Table, CleanError> {
    let year = table.require_column("year")?;
    let population = table.require_column("population")?;
    let gender = table.require_column("gender")?;

    let mut coerced: Vec<Row> = table.rows.clone();
    for row in &mut coerced {
        row.values[year] = row.values[year].to_numeric();
        row.values[population] = row.values[population].to_numeric();
    }
    warn_on_coercion(table, &coerced, year, log);
    warn_on_coercion(table, &coerced, population, log);

    let mut rows = Vec::with_capacity(coerced.len());
    let mut negative = 0usize;
    for mut row in coerced {
        match (cast_integer("year", &row.values[year])?, year_policy) {
            (Some(y), _) => row.values[year] = Value::Integer(y),
            (None, YearNullPolicy::Placeholder(p)) => row.values[year] = Value::Integer(p),
            (None, YearNullPolicy::DropRow) => continue,
        }
        let mut pop = cast_integer("population", &row.values[population])?.unwrap_or(0);
        if pop < 0 {
            negative += 1;
            match negative_population {
                NegativePopulationPolicy::Keep => {}
                NegativePopulationPolicy::Zero => pop = 0,
                NegativePopulationPolicy::DropRow => continue,
            }
        }
        row.values[population] = Value::Integer(pop);
        rows.push(row);
    }
    if negative > 0 {
        log.warn(format_args!(
            "Found {negative} negative 'population' value(s); policy {negative_population:?} applied"
        ));
    }

    let mut converted = table.with_rows(rows);
    categorize(&mut converted, gender);
    println!("'{}' column converted to categorical.", converted.columns[gender]);
    Ok(converted)
}

/// Report cells that held a value before coercion and are null after it.
fn warn_on_coercion(before: &Table, after: &[Row], col: usize, log: &RunLog) {
    let introduced = before
        .rows
        .iter()
        .zip(after)
        .filter(|(b, a)| !b.values[col].is_null() && a.values[col].is_null())
        .count();
    if introduced > 0 {
        let name = &before.columns[col];
        println!("Warning: NaN introduced by coercion in '{name}'");
        log.warn(format_args!(
            "Coercion to numeric nulled {introduced} value(s) in '{name}'"
        ));
    }
}

/// Replace the column's values with codes into its sorted distinct levels.
fn categorize(table: &mut Table, col: usize) {
    let labels: Vec<Option<String>> = table
        .rows
        .iter()
        .map(|row| match &row.values[col] {
            Value::Null => None,
            value => Some(table.render_cell(col, value)),
        })
        .collect();
    let levels: Vec<String> = labels
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    for (row, label) in table.rows.iter_mut().zip(labels) {
        row.values[col] = match label {
            None => Value::Null,
            Some(label) => levels
                .binary_search(&label)
                .map_or(Value::Null, |code| Value::Category(code as u32)),
        };
    }
    table.categories.insert(table.columns[col].clone(), levels);
}

fn dtype_summary(table: &Table) -> String {
    let width = table.columns.iter().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, dtype) in table.dtypes() {
        out.push_str(&format!("{name:<width$}    {dtype}\n"));
    }
    out.push_str("dtype: object");
    out
}

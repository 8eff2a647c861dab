use super::{cast_integer, stats};
use crate::config::YearNullPolicy;
use crate::data::model::{Row, Table, Value};
use crate::error::CleanError;
use crate::logging::RunLog;

/// Impute or discard missing values, column by column:
///
/// * `age` – nulls become the median of the non-null ages in `table`; the
///   whole column is held as floats afterwards.
/// * `year` – coerced to numeric, then nulls resolved by `year_policy`, then
///   cast to integer. Skipped when the column is absent.
/// * `population` – coerced to numeric, nulls become `0`, cast to integer.
///   Skipped when the column is absent.
/// * `income_groups`, `gender` – rows with a null in either are dropped.
///
/// Only dropped rows count as removed; imputed rows do not.
pub fn handle_missing_values(
    table: &Table,
    year_policy: YearNullPolicy,
    log: &RunLog,
) -> Result<Table, CleanError> {
    let age = table.require_column("age")?;
    let income_groups = table.require_column("income_groups")?;
    let gender = table.require_column("gender")?;
    let year = table.column_index("year");
    let population = table.column_index("population");

    let with_nulls = table.rows.iter().filter(|r| r.has_null()).count();

    let ages: Vec<f64> = table.column_values(age).filter_map(Value::as_f64).collect();
    let age_median = stats::median(&ages);
    if age_median.is_none() && !table.is_empty() {
        log.warn(format_args!(
            "Column 'age' has no numeric values; its nulls were left in place."
        ));
    }

    let mut rows: Vec<Row> = Vec::with_capacity(table.len());
    let mut removed = 0usize;
    for source in &table.rows {
        let mut row = source.clone();

        row.values[age] = match &row.values[age] {
            Value::Integer(i) => Value::Float(*i as f64),
            Value::Null => age_median.map_or(Value::Null, Value::Float),
            other => other.clone(),
        };

        if let Some(col) = year {
            let coerced = cast_integer("year", &row.values[col].to_numeric())?;
            match (coerced, year_policy) {
                (Some(y), _) => row.values[col] = Value::Integer(y),
                (None, YearNullPolicy::Placeholder(p)) => row.values[col] = Value::Integer(p),
                (None, YearNullPolicy::DropRow) => {
                    removed += 1;
                    continue;
                }
            }
        }

        if let Some(col) = population {
            let coerced = cast_integer("population", &row.values[col].to_numeric())?;
            row.values[col] = Value::Integer(coerced.unwrap_or(0));
        }

        if row.values[income_groups].is_null() || row.values[gender].is_null() {
            removed += 1;
            continue;
        }
        rows.push(row);
    }

    log.info(format_args!(
        "Rows with missing values before cleaning: {with_nulls}"
    ));
    log.info(format_args!(
        "Rows removed while handling missing values: {removed}"
    ));
    Ok(table.with_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::capture;
    use log::Level;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn table(rows: Vec<Vec<Value>>) -> Table {
        Table::new(
            ["age", "year", "population", "income_groups", "gender", "country"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows.into_iter()
                .enumerate()
                .map(|(i, v)| Row::new(i, v))
                .collect(),
        )
    }

    #[test]
    fn imputes_numeric_columns_and_drops_missing_categories() {
        let input = table(vec![
            vec![Value::Integer(20), Value::Integer(2001), Value::Integer(10), s("A"), s("M"), s("X")],
            vec![Value::Null, s("n/a year"), Value::Null, s("B"), s("F"), Value::Null],
            vec![Value::Integer(40), Value::Float(2003.0), s("12"), Value::Null, s("F"), s("Y")],
            vec![Value::Float(31.0), Value::Integer(2004), Value::Integer(7), s("C"), Value::Null, s("Z")],
        ]);
        let (log, captured) = capture();

        let out = handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(
            out.rows[1].values,
            vec![
                Value::Float(31.0),
                Value::Integer(-1),
                Value::Integer(0),
                s("B"),
                s("F"),
                // untouched pass-through column keeps its null
                Value::Null,
            ]
        );
        assert!(captured.contains(Level::Info, "before cleaning: 3"));
        assert!(captured.contains(Level::Info, "handling missing values: 2"));
        // input is not modified
        assert!(input.rows[1].values[0].is_null());
    }

    #[test]
    fn integer_ages_are_widened_alongside_the_imputed_median() {
        let input = table(vec![
            vec![Value::Integer(30), Value::Integer(2020), Value::Integer(100), s("A"), s("M"), s("X")],
            vec![Value::Null, Value::Integer(2020), Value::Integer(100), s("A"), s("M"), s("X")],
        ]);
        let (log, _) = capture();

        let out = handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log).unwrap();

        assert_eq!(out.rows[0].values[0], Value::Float(30.0));
        assert_eq!(out.rows[1].values[0], Value::Float(30.0));
        assert_eq!(out.rows[0].values, out.rows[1].values);
    }

    #[test]
    fn drop_row_year_policy_removes_unparseable_years() {
        let input = table(vec![
            vec![Value::Integer(20), s("19x9"), Value::Integer(1), s("A"), s("M"), s("X")],
            vec![Value::Integer(21), s("1999"), Value::Integer(1), s("A"), s("M"), s("X")],
        ]);
        let (log, _) = capture();

        let out = handle_missing_values(&input, YearNullPolicy::DropRow, &log).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0].values[1], Value::Integer(1999));
    }

    #[test]
    fn all_null_ages_are_left_and_warned() {
        let input = table(vec![vec![
            Value::Null,
            Value::Integer(2000),
            Value::Integer(1),
            s("A"),
            s("M"),
            s("X"),
        ]]);
        let (log, captured) = capture();

        let out = handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log).unwrap();

        assert!(out.rows[0].values[0].is_null());
        assert!(captured.contains(Level::Warn, "no numeric values"));
    }

    #[test]
    fn optional_numeric_columns_may_be_absent() {
        let input = Table::new(
            vec!["age".into(), "income_groups".into(), "gender".into()],
            vec![Row::new(0, vec![Value::Integer(5), s("A"), s("M")])],
        );
        let (log, _) = capture();
        let out = handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn required_columns_are_checked() {
        let input = Table::new(vec!["year".into()], Vec::new());
        let (log, _) = capture();
        assert!(matches!(
            handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log),
            Err(CleanError::MissingColumn { .. })
        ));
    }

    #[test]
    fn preserves_row_count_when_nothing_is_dropped() {
        let input = table(vec![
            vec![Value::Null, Value::Null, Value::Null, s("A"), s("M"), s("X")],
            vec![Value::Integer(3), Value::Integer(2000), Value::Integer(4), s("B"), s("F"), s("Y")],
        ]);
        let (log, _) = capture();
        let out = handle_missing_values(&input, YearNullPolicy::Placeholder(-1), &log).unwrap();
        assert_eq!(out.len(), input.len());
        assert!(out.rows.iter().all(|r| !r.values[0].is_null()));
    }
}

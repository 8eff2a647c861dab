use std::collections::HashSet;

use crate::data::filter::{format_indices, partition_rows};
use crate::data::model::{Table, Value};
use crate::logging::RunLog;

/// Keep the first occurrence of every distinct row. Rows are compared on
/// their values only; the source index does not take part.
pub fn remove_duplicates(table: &Table, log: &RunLog) -> Table {
    let mut seen: HashSet<&[Value]> = HashSet::with_capacity(table.len());
    let part = partition_rows(table, |row| seen.insert(row.values.as_slice()));

    log.info(format_args!(
        "Duplicate rows identified at indices: {}",
        format_indices(&part.removed)
    ));
    log.info(format_args!(
        "Removed {} duplicate rows.",
        part.removed_count()
    ));
    part.kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;
    use crate::logging::testing::capture;
    use log::Level;
    use proptest::prelude::*;

    fn row(index: usize, group: &str, n: i64, year: i64) -> Row {
        Row::new(
            index,
            vec![
                Value::String(group.to_string()),
                Value::Integer(n),
                Value::Integer(year),
            ],
        )
    }

    fn table(rows: Vec<Row>) -> Table {
        Table::new(vec!["group".into(), "n".into(), "year".into()], rows)
    }

    #[test]
    fn triplicate_collapses_to_one_row() {
        let input = table(vec![
            row(0, "A", 1, 2020),
            row(1, "A", 1, 2020),
            row(2, "B", 1, 2020),
            row(3, "A", 1, 2020),
        ]);
        let (log, captured) = capture();

        let out = remove_duplicates(&input, &log);

        assert_eq!(out.len(), 2);
        assert_eq!(out.rows[0].index, 0);
        assert_eq!(out.rows[1].index, 2);
        assert!(captured.contains(Level::Info, "Removed 2 duplicate rows."));
        assert!(captured.contains(Level::Info, "identified at indices: [1, 3]"));
    }

    #[test]
    fn null_cells_count_as_equal() {
        let nulls = |i| Row::new(i, vec![Value::Null, Value::Integer(1), Value::Null]);
        let input = table(vec![nulls(0), nulls(1)]);
        let (log, _) = capture();
        assert_eq!(remove_duplicates(&input, &log).len(), 1);
    }

    #[test]
    fn integer_and_float_spellings_of_one_number_are_duplicates() {
        use crate::data::loader::load_csv;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"group,age,year\nA,30,2020\nA,30.0,2020\n").unwrap();
        let (log, captured) = capture();
        let input = load_csv(file.path(), &log).unwrap();

        let out = remove_duplicates(&input, &log);

        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0].values[1], Value::Float(30.0));
        assert!(captured.contains(Level::Info, "Removed 1 duplicate rows."));
    }

    proptest! {
        #[test]
        fn prop_dedup_is_idempotent(cells in prop::collection::vec((0u8..3, 0i64..3), 0..40)) {
            let input = table(
                cells
                    .iter()
                    .enumerate()
                    .map(|(i, (g, n))| row(i, &g.to_string(), *n, 2020))
                    .collect(),
            );
            let (log, _) = capture();

            let once = remove_duplicates(&input, &log);
            let twice = remove_duplicates(&once, &log);

            prop_assert!(once.len() <= input.len());
            prop_assert_eq!(once.len(), twice.len());
            for (a, b) in once.rows.iter().zip(&twice.rows) {
                prop_assert_eq!(a.index, b.index);
                prop_assert_eq!(&a.values, &b.values);
            }
        }
    }
}

use super::model::{Row, Table};

/// Most indices spelled out in an "identified at indices" log line.
const MAX_LOGGED_INDICES: usize = 20;

// ---------------------------------------------------------------------------
// Row partitioning
// ---------------------------------------------------------------------------

/// Result of splitting a table by a row predicate.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Rows that passed, in their original order.
    pub kept: Table,
    /// Source indices of the rows that failed.
    pub removed: Vec<usize>,
}

impl Partition {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// Split `table` into the rows `keep` accepts and the indices of those it rejects.
/// The input is left untouched.
pub fn partition_rows<'a, F>(table: &'a Table, mut keep: F) -> Partition
where
    F: FnMut(&'a Row) -> bool,
{
    let mut kept = Vec::with_capacity(table.len());
    let mut removed = Vec::new();
    for row in &table.rows {
        if keep(row) {
            kept.push(row.clone());
        } else {
            removed.push(row.index);
        }
    }
    Partition {
        kept: table.with_rows(kept),
        removed,
    }
}

/// `[3, 8, 12]`, truncated with a trailing count past [`MAX_LOGGED_INDICES`].
pub fn format_indices(indices: &[usize]) -> String {
    let shown: Vec<String> = indices
        .iter()
        .take(MAX_LOGGED_INDICES)
        .map(usize::to_string)
        .collect();
    let rest = indices.len().saturating_sub(MAX_LOGGED_INDICES);
    if rest == 0 {
        format!("[{}]", shown.join(", "))
    } else {
        format!("[{}, ... and {rest} more]", shown.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    #[test]
    fn partition_keeps_order_and_reports_source_indices() {
        let table = Table::new(
            vec!["n".into()],
            (0..5)
                .map(|i| Row::new(i + 10, vec![Value::Integer(i as i64)]))
                .collect(),
        );

        let part = partition_rows(&table, |row| row.values[0] != Value::Integer(2));

        assert_eq!(part.kept.len(), 4);
        assert_eq!(part.removed, vec![12]);
        assert_eq!(part.removed_count(), 1);
        assert_eq!(
            part.kept.rows.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![10, 11, 13, 14]
        );
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn indices_are_truncated_in_logs() {
        assert_eq!(format_indices(&[]), "[]");
        assert_eq!(format_indices(&[1, 4]), "[1, 4]");
        let many: Vec<usize> = (0..25).collect();
        assert!(format_indices(&many).ends_with(", 19, ... and 5 more]"));
    }
}

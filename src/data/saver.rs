use std::path::Path;

use super::model::Table;
use crate::error::CleanError;
use crate::logging::RunLog;

/// Write `table` as CSV with a header row and no index column.
pub fn save_csv(table: &Table, path: &Path, log: &RunLog) -> Result<(), CleanError> {
    match write_table(table, path) {
        Ok(()) => {
            log.info(format_args!("Cleaned data saved to {}.", path.display()));
            Ok(())
        }
        Err(source) => {
            log.error(format_args!("Failed to save cleaned data: {source}"));
            Err(CleanError::Save {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn write_table(table: &Table, path: &Path) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(
            row.values
                .iter()
                .enumerate()
                .map(|(col, value)| table.render_cell(col, value)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

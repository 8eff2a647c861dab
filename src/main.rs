mod cleaning;
mod config;
mod data;
mod error;
mod logging;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};

use config::CleaningConfig;
use data::{loader, saver};
use logging::RunLog;

fn main() -> Result<()> {
    let config = CleaningConfig::default();
    let log = RunLog::to_file(&config.log_path)
        .with_context(|| format!("opening log file {}", config.log_path.display()))?;

    let result = run(&config, &log);
    log.flush();
    result
}

fn run(config: &CleaningConfig, log: &RunLog) -> Result<()> {
    let table = loader::load_csv(&config.input_path, log).context("loading input data")?;
    let cleaned = cleaning::run(&table, config, Local::now().year(), log)
        .context("cleaning population data")?;
    saver::save_csv(&cleaned, &config.output_path, log).context("saving cleaned data")?;
    Ok(())
}

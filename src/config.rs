use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Year policies
// ---------------------------------------------------------------------------

/// What a stage does with a `year` that is missing or failed numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearNullPolicy {
    /// Replace with a sentinel value that is outside the real year domain.
    Placeholder(i64),
    /// Remove the row.
    DropRow,
}

/// Whether the future-date filter keeps rows carrying the placeholder year.
///
/// A placeholder such as `-1` is always below the current year, so without an
/// explicit choice those rows pass the filter as if they had a valid old year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderYearPolicy {
    Retain,
    Drop,
}

/// What the type normalizer does with a negative `population`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativePopulationPolicy {
    Keep,
    /// Clamp to `0`.
    Zero,
    DropRow,
}

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Everything the pipeline driver needs, independent of any one stage.
#[derive(Debug, Clone)]
pub struct CleaningConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Append-mode run log.
    pub log_path: PathBuf,

    /// Year handling in the missing-value handler.
    pub missing_year_policy: YearNullPolicy,
    /// Year handling in the type normalizer.
    pub normalize_year_policy: YearNullPolicy,
    /// Placeholder handling in the future-date filter.
    pub placeholder_year_policy: PlaceholderYearPolicy,
    /// Earliest real year the future-date filter keeps. Placeholder years
    /// are governed by `placeholder_year_policy` instead.
    pub min_plausible_year: Option<i64>,
    pub negative_population_policy: NegativePopulationPolicy,
    /// Drop duplicates again once every stage has run; imputation can make
    /// rows that differed only in a missing value identical.
    pub dedup_after_cleaning: bool,

    /// Fence width in IQRs for the outlier corrector.
    pub iqr_multiplier: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("messy_population_data.csv"),
            output_path: PathBuf::from("cleaned_population_data.csv"),
            log_path: PathBuf::from("data_cleaning.log"),
            missing_year_policy: YearNullPolicy::Placeholder(-1),
            normalize_year_policy: YearNullPolicy::DropRow,
            placeholder_year_policy: PlaceholderYearPolicy::Retain,
            min_plausible_year: None,
            negative_population_policy: NegativePopulationPolicy::DropRow,
            dedup_after_cleaning: true,
            iqr_multiplier: 1.5,
        }
    }
}

impl CleaningConfig {
    /// The sentinel the missing-value handler writes, if it writes one.
    pub fn year_placeholder(&self) -> Option<i64> {
        match self.missing_year_policy {
            YearNullPolicy::Placeholder(value) => Some(value),
            YearNullPolicy::DropRow => None,
        }
    }
}

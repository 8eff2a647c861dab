use serde::Serialize;

/// One row of the messy input. `year` and `population` are text so that
/// unparseable values can be written alongside real numbers.
#[derive(Debug, Clone, Serialize)]
struct PopulationRecord {
    income_groups: Option<&'static str>,
    age: Option<u32>,
    gender: Option<&'static str>,
    year: Option<String>,
    population: Option<String>,
}

const INCOME_GROUPS: [&str; 4] = [
    "low_income",
    "lower_middle_income",
    "upper_middle_income",
    "high_income",
];
const GENDERS: [&str; 2] = ["female", "male"];
const GARBAGE: [&str; 3] = ["unknown", "n.a.", "???"];

/// Share of observations written at all, per (group, gender, age, year).
const SAMPLING_RATE: f64 = 0.05;
const BLANK_RATE: f64 = 0.02;
const BLANK_AGE_RATE: f64 = 0.05;
const GARBAGE_RATE: f64 = 0.01;
const FUTURE_YEAR_RATE: f64 = 0.01;
const OUTLIER_RATE: f64 = 0.01;

/// Seeded source of the defects written into the sample (splitmix64).
struct Noise {
    state: u64,
}

impl Noise {
    fn new(seed: u64) -> Self {
        Noise { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn garbage(&mut self) -> String {
        GARBAGE[self.below(GARBAGE.len())].to_string()
    }

    /// `None` for a `rate` share of cells.
    fn blank<T>(&mut self, value: T, rate: f64) -> Option<T> {
        (self.unit() >= rate).then_some(value)
    }

    fn year_cell(&mut self, year: u32) -> String {
        if self.unit() < GARBAGE_RATE {
            self.garbage()
        } else if self.unit() < FUTURE_YEAR_RATE {
            (2030 + self.below(70)).to_string()
        } else {
            year.to_string()
        }
    }

    fn population_cell(&mut self) -> String {
        let base = 50_000.0 + self.unit() * 950_000.0;
        if self.unit() < GARBAGE_RATE {
            self.garbage()
        } else if self.unit() < OUTLIER_RATE {
            ((base * 100.0) as u64).to_string()
        } else {
            (base as u64).to_string()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut noise = Noise::new(42);
    let mut records: Vec<PopulationRecord> = Vec::new();

    for &income in &INCOME_GROUPS {
        for &gender in &GENDERS {
            for age in (0..=100).step_by(5) {
                for year in 1950..=2025 {
                    if noise.unit() >= SAMPLING_RATE {
                        continue;
                    }
                    let year = noise.year_cell(year);
                    let population = noise.population_cell();
                    records.push(PopulationRecord {
                        income_groups: noise.blank(income, BLANK_RATE),
                        age: noise.blank(age, BLANK_AGE_RATE),
                        gender: noise.blank(gender, BLANK_RATE),
                        year: noise.blank(year, BLANK_RATE),
                        population: noise.blank(population, BLANK_RATE),
                    });
                }
            }
        }
    }

    // exact duplicates
    let originals = records.len();
    for _ in 0..originals / 20 {
        let i = noise.below(originals);
        records.push(records[i].clone());
    }

    let output_path = "messy_population_data.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {} rows ({} duplicates) to {output_path}",
        records.len(),
        records.len() - originals
    );
    Ok(())
}

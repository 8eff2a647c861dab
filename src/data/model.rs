use std::collections::BTreeMap;
use std::fmt;

use crate::error::CleanError;

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Code into the owning table's category levels for this column.
    Category(u32),
    Null,
}

// -- Manual Eq/Hash so rows can be de-duplicated through a HashSet.
// Floats compare by bit pattern, which makes NaN equal to itself.

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (String(a), String(b)) => a == b,
            (Category(a), Category(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Category(c) => c.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Category(c) => write!(f, "<category {c}>"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interpret the value as an `f64` if it is already numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Coerce to a numeric value, turning anything unparseable into `Null`
    /// (the `errors="coerce"` behaviour of `pd.to_numeric`).
    pub fn to_numeric(&self) -> Value {
        match self {
            Value::Integer(_) => self.clone(),
            Value::Float(f) if f.is_nan() => Value::Null,
            Value::Float(_) => self.clone(),
            Value::Bool(b) => Value::Integer(i64::from(*b)),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Value::Integer(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    if f.is_nan() {
                        Value::Null
                    } else {
                        Value::Float(f)
                    }
                } else {
                    Value::Null
                }
            }
            Value::Category(_) | Value::Null => Value::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// DType – per-column type summary
// ---------------------------------------------------------------------------

/// Column dtype as reported in the console summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    Category,
    Object,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Category => "category",
            DType::Object => "object",
        };
        f.write_str(name)
    }
}

impl DType {
    /// Infer the dtype Pandas would assign to a column holding `values`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> DType {
        let (mut ints, mut floats, mut bools, mut cats, mut nulls, mut other) =
            (0usize, 0usize, 0usize, 0usize, 0usize, 0usize);
        for v in values {
            match v {
                Value::Integer(_) => ints += 1,
                Value::Float(_) => floats += 1,
                Value::Bool(_) => bools += 1,
                Value::Category(_) => cats += 1,
                Value::Null => nulls += 1,
                Value::String(_) => other += 1,
            }
        }
        let non_null = ints + floats + bools + cats + other;
        if cats > 0 && cats == non_null {
            DType::Category
        } else if non_null == 0 {
            // All-null columns read back as float NaN.
            DType::Float64
        } else if ints == non_null && nulls == 0 {
            DType::Int64
        } else if ints + floats == non_null {
            DType::Float64
        } else if bools == non_null && nulls == 0 {
            DType::Bool
        } else {
            DType::Object
        }
    }
}

// ---------------------------------------------------------------------------
// Row – one record
// ---------------------------------------------------------------------------

/// A single record, positionally aligned with [`Table::columns`].
#[derive(Debug, Clone)]
pub struct Row {
    /// Position of the row in the source file (the Pandas index).
    pub index: usize,
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(index: usize, values: Vec<Value>) -> Self {
        Row { index, values }
    }

    pub fn has_null(&self) -> bool {
        self.values.iter().any(Value::is_null)
    }
}

// ---------------------------------------------------------------------------
// Table – the complete dataset
// ---------------------------------------------------------------------------

/// An ordered set of rows sharing one schema.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in file order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Sorted levels for every categorical column, keyed by column name.
    pub categories: BTreeMap<String, Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Table {
            columns,
            rows,
            categories: BTreeMap::new(),
        }
    }

    /// A table with the same schema and categories but different rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Table {
        Table {
            columns: self.columns.clone(),
            rows,
            categories: self.categories.clone(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like [`Table::column_index`] but fails with [`CleanError::MissingColumn`].
    pub fn require_column(&self, name: &str) -> Result<usize, CleanError> {
        self.column_index(name)
            .ok_or_else(|| CleanError::MissingColumn {
                column: name.to_string(),
            })
    }

    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |r| &r.values[col])
    }

    /// Give every all-numeric column a single cell type: a column holding
    /// any float or null has its integers widened to floats (`float64`).
    pub fn unify_numeric_columns(&mut self) {
        for col in 0..self.columns.len() {
            if DType::infer(self.column_values(col)) != DType::Float64 {
                continue;
            }
            for row in &mut self.rows {
                if let Value::Integer(i) = row.values[col] {
                    row.values[col] = Value::Float(i as f64);
                }
            }
        }
    }

    /// Column name → dtype, in column order.
    pub fn dtypes(&self) -> Vec<(&str, DType)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), DType::infer(self.column_values(i))))
            .collect()
    }

    /// Render a cell as it should appear in CSV output.
    pub fn render_cell(&self, col: usize, value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Category(code) => self
                .categories
                .get(&self.columns[col])
                .and_then(|levels| levels.get(*code as usize))
                .cloned()
                .unwrap_or_default(),
            other => other.to_string(),
        }
    }
}

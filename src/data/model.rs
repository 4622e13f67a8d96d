use std::fmt;

use serde::{Serialize, Serializer};

use super::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

/// Cells serialize as plain JSON scalars so they can go straight into a trace.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            CellValue::Float(_) | CellValue::Null => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Field values read as missing, as a pandas-style CSV reader treats them.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Infer the type of a raw field: empty or a missing marker → null, then
    /// integer, float, bool, text.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || MISSING_MARKERS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Table – named columns of equal length
// ---------------------------------------------------------------------------

/// A column-oriented in-memory table. Column names are kept verbatim,
/// including any leading whitespace from the source header.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Display name of the source (file name), used in error messages.
    pub source: String,
    column_names: Vec<String>,
    columns: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from a header and row-major records.
    ///
    /// Short records are padded with [`CellValue::Null`].
    pub fn from_rows(source: &str, column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<Vec<CellValue>> =
            vec![Vec::with_capacity(rows.len()); column_names.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.push(cells.next().unwrap_or(CellValue::Null));
            }
        }
        Table {
            source: source.to_string(),
            column_names,
            columns,
        }
    }

    /// Ordered column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Borrow a column by exact name.
    pub fn column(&self, name: &str) -> Result<&[CellValue], DataError> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| DataError::MissingColumn {
                source_name: self.source.clone(),
                column: name.to_string(),
            })
    }

    /// Check that every name in `required` is present.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), DataError> {
        required.iter().try_for_each(|name| self.column(name).map(|_| ()))
    }

    /// Append a column computed from a numeric source column.
    ///
    /// Null cells stay null; any other non-numeric cell is an error.
    pub fn derive_column<F>(&mut self, name: &str, source: &str, f: F) -> Result<(), DataError>
    where
        F: Fn(f64) -> f64,
    {
        let derived = self
            .column(source)?
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                CellValue::Null => Ok(CellValue::Null),
                other => other.as_f64().map(|v| CellValue::Float(f(v))).ok_or_else(|| {
                    DataError::NotNumeric {
                        source_name: self.source.clone(),
                        column: source.to_string(),
                        row,
                        value: other.to_string(),
                    }
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.column_names.push(name.to_string());
        self.columns.push(derived);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Datasets – everything the page renders from
// ---------------------------------------------------------------------------

/// All tables the dashboard reads, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub hurricane_count: Table,
    pub cyclone_energy: Table,
    pub continent_temperature: Table,
    pub global_temperature: Table,
    pub arctic_ice: Table,
    /// Carries the derived millimetre column next to the raw inches.
    pub sea_levels: Table,
}

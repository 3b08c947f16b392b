//! Raw spreadsheet rows
//!
//! A row is a flat map from column header to the raw cell value exactly as
//! the workbook reader produced it. Columns missing from the map were not
//! present in the row at all; [`Cell::Empty`] marks a cell that was present
//! but blank.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat};
use serde_json::Value;

/// Largest magnitude an f64 holds with every integer below it exact
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Raw value of one spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Date-formatted cell, taken as UTC
    DateTime(NaiveDateTime),
    Empty,
}

impl Cell {
    /// Converts to the loosely-typed value placed in a claim candidate
    pub fn to_value(&self) -> Value {
        match self {
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Number(n) => number_value(*n),
            Cell::Bool(b) => Value::Bool(*b),
            Cell::DateTime(dt) => {
                Value::String(dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Cell::Empty => Value::Null,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// Whole numbers become JSON integers so they read back as `12345`, not
/// `12345.0`
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::DateTime(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

/// One data row keyed by column header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpreadsheetRow {
    cells: BTreeMap<String, Cell>,
}

impl SpreadsheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(column, cell);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(column.into(), cell.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<Cell> {
        self.cells.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for SpreadsheetRow {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

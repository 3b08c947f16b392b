//! Validation gate
//!
//! Turns a [`ClaimCandidate`] into a [`ClaimRecord`] or names the first
//! field that stops it. Leaves are normalized one by one against the column
//! map, then the required set is checked, then the typed record is built.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::candidate::ClaimCandidate;
use crate::claim::ClaimRecord;
use crate::row::number_value;
use crate::schema::{required_paths, ColumnMapping, FieldKind, COLUMN_MAP};

/// Why a candidate could not become a claim record
///
/// Field names are dotted JSON paths, e.g. `driverDetails.firstName`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Required field is empty: {0}")]
    EmptyField(String),

    #[error("Invalid value for {field}: expected {expected}, found {found}")]
    InvalidField {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Malformed claim record: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Path of the offending field, when one is known
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field)
            | ValidationError::EmptyField(field)
            | ValidationError::InvalidField { field, .. } => Some(field),
            ValidationError::Malformed(_) => None,
        }
    }

    fn invalid(field: &str, expected: &'static str, found: &Value) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            expected,
            found: describe(found),
        }
    }
}

impl ClaimRecord {
    /// Builds a record from a candidate value tree
    pub fn from_candidate(candidate: &ClaimCandidate) -> Result<Self, ValidationError> {
        let normalized = normalize(candidate)?;

        for path in required_paths() {
            if normalized.get(path).is_none() {
                return Err(ValidationError::MissingField(path.to_string()));
            }
        }

        let record: ClaimRecord = serde_json::from_value(normalized.into_value())
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        record.check_required()?;
        Ok(record)
    }
}

impl TryFrom<ClaimCandidate> for ClaimRecord {
    type Error = ValidationError;

    fn try_from(candidate: ClaimCandidate) -> Result<Self, Self::Error> {
        ClaimRecord::from_candidate(&candidate)
    }
}

/// Rebuilds the candidate with every declared leaf coerced to its canonical
/// JSON form; absent and null leaves are dropped along with unknown keys
fn normalize(candidate: &ClaimCandidate) -> Result<ClaimCandidate, ValidationError> {
    if !candidate.as_value().is_object() {
        return Err(ValidationError::Malformed(format!(
            "expected an object, found {}",
            describe(candidate.as_value())
        )));
    }

    let mut normalized = ClaimCandidate::skeleton();
    for mapping in COLUMN_MAP {
        check_groups(candidate, mapping)?;
        let Some(raw) = candidate.get(mapping.path) else {
            continue;
        };
        if let Some(value) = coerce(mapping.kind, mapping.path, raw)? {
            normalized.set(mapping.path, value);
        }
    }
    Ok(normalized)
}

fn check_groups(candidate: &ClaimCandidate, mapping: &ColumnMapping) -> Result<(), ValidationError> {
    for group in mapping.groups() {
        match candidate.get(group) {
            None | Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(other) => return Err(ValidationError::invalid(group, "object", other)),
        }
    }
    Ok(())
}

fn coerce(kind: FieldKind, path: &str, raw: &Value) -> Result<Option<Value>, ValidationError> {
    if raw.is_null() {
        return Ok(None);
    }

    match kind {
        FieldKind::Text => match raw {
            Value::String(s) => Ok(Some(Value::String(s.clone()))),
            Value::Number(n) => Ok(Some(Value::String(number_text(n)))),
            Value::Bool(b) => Ok(Some(Value::String(b.to_string()))),
            other => Err(ValidationError::invalid(path, kind.expected(), other)),
        },
        FieldKind::Number => match raw {
            Value::Number(n) => Ok(Some(Value::Number(n.clone()))),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(|n| Some(Value::Number(n)))
                .ok_or_else(|| ValidationError::invalid(path, kind.expected(), raw)),
            other => Err(ValidationError::invalid(path, kind.expected(), other)),
        },
        FieldKind::Date => coerce_date(path, raw),
        FieldKind::Flag => match raw {
            Value::Bool(b) => Ok(Some(Value::Bool(*b))),
            other => Err(ValidationError::invalid(path, kind.expected(), other)),
        },
        FieldKind::DateList => coerce_date_list(path, raw),
    }
}

/// Canonical text of a number; whole floats print without a fraction
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => match number_value(f) {
            Value::Number(whole) => whole.to_string(),
            _ => n.to_string(),
        },
        _ => n.to_string(),
    }
}

fn coerce_date(path: &str, raw: &Value) -> Result<Option<Value>, ValidationError> {
    match raw {
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_date(s)
            .map(|dt| Some(render_date(dt)))
            .ok_or_else(|| ValidationError::invalid(path, FieldKind::Date.expected(), raw)),
        other => Err(ValidationError::invalid(path, FieldKind::Date.expected(), other)),
    }
}

fn coerce_date_list(path: &str, raw: &Value) -> Result<Option<Value>, ValidationError> {
    let mut dates = Vec::new();
    match raw {
        Value::Array(items) => {
            for item in items {
                if let Some(date) = coerce_date(path, item)? {
                    dates.push(date);
                }
            }
        }
        Value::String(s) => {
            if s.trim().is_empty() {
                return Ok(None);
            }
            for part in s.split([',', ';', '\n']).map(str::trim).filter(|p| !p.is_empty()) {
                let date = parse_date(part).ok_or_else(|| {
                    ValidationError::invalid(path, FieldKind::DateList.expected(), raw)
                })?;
                dates.push(render_date(date));
            }
        }
        other => return Err(ValidationError::invalid(path, FieldKind::DateList.expected(), other)),
    }
    Ok(Some(Value::Array(dates)))
}

/// Parses the date renderings accepted in claim candidates
///
/// RFC 3339, ISO date-time without offset (taken as UTC), `YYYY-MM-DD` and
/// `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

fn render_date(dt: DateTime<Utc>) -> Value {
    Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

//! Typed field values and schema-directed coercion.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use thiserror::Error;

use crate::FieldType;

/// Largest magnitude at which every integral `f64` is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Naive date-time layouts accepted for date fields, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts accepted for date fields; the time is midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A field value on a [`Record`](crate::Record).
///
/// The first four variants mirror [`FieldType`]. `Other` holds anything a
/// schema does not type: nested arrays and objects, and `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    Other(serde_json::Value),
}

/// A decoded value could not be converted to its declared field type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce {found} to {expected}")]
pub struct CoercionError {
    pub expected: FieldType,
    pub found: String,
}

impl Value {
    /// The field type this value satisfies, or `None` for [`Value::Other`].
    pub fn kind(&self) -> Option<FieldType> {
        match self {
            Self::String(_) => Some(FieldType::String),
            Self::Number(_) => Some(FieldType::Number),
            Self::Boolean(_) => Some(FieldType::Boolean),
            Self::Date(_) => Some(FieldType::Date),
            Self::Other(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Other(serde_json::Value::Null))
    }

    /// Converts a decoded JSON value without consulting any schema.
    ///
    /// Strings stay strings even when they look like dates; turning them
    /// into dates is the schema's job (see [`coerce`]).
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Other(serde_json::Value::Number(n)),
            },
            other => Self::Other(other),
        }
    }

    /// The JSON form written to the backend.
    ///
    /// Dates become RFC 3339 strings, with milliseconds unless the date
    /// carries finer precision. Integral numbers are written without a
    /// fraction. Returns `None` for non-finite numbers, which JSON cannot
    /// represent, and for dates outside years 0000 to 9999, which RFC 3339
    /// cannot.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::String(s) => Some(serde_json::Value::String(s.clone())),
            Self::Number(n) => number_to_json(*n),
            Self::Boolean(b) => Some(serde_json::Value::Bool(*b)),
            Self::Date(d) => date_to_json(d),
            Self::Other(v) => Some(v.clone()),
        }
    }

    /// Textual representation, used where values are compared as strings.
    pub fn repr(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::Boolean(b) => b.to_string(),
            Self::Date(d) => format_date(d),
            Self::Other(v) => v.to_string(),
        }
    }

    /// Ordering between two values of the same kind.
    ///
    /// Values of different kinds, `NaN`s and opaque values are unordered.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        match self.kind() {
            Some(kind) => format!("{kind} {:?}", self.repr()),
            None => format!("value {}", self.repr()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_json() {
            Some(json) => json.serialize(serializer),
            None => Err(serde::ser::Error::custom(format!(
                "{} cannot be represented in JSON",
                self.describe()
            ))),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

/// Converts `value` to the declared `tag`.
///
/// Values already of the declared kind, and `null`, are returned as is.
pub fn coerce(tag: FieldType, value: Value) -> Result<Value, CoercionError> {
    if value.kind() == Some(tag) || value.is_null() {
        return Ok(value);
    }

    let converted = match tag {
        FieldType::Date => match &value {
            Value::String(s) => parse_date(s).map(Value::Date),
            Value::Number(ms) => date_from_millis(*ms).map(Value::Date),
            _ => None,
        },
        FieldType::Number => match &value {
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Number),
            Value::Date(d) => Some(Value::Number(d.timestamp_millis() as f64)),
            _ => None,
        },
        FieldType::Boolean => match &value {
            Value::String(s) if s == "true" => Some(Value::Boolean(true)),
            Value::String(s) if s == "false" => Some(Value::Boolean(false)),
            _ => None,
        },
        FieldType::String => match &value {
            Value::Number(_) | Value::Boolean(_) | Value::Date(_) => {
                Some(Value::String(value.repr()))
            }
            _ => None,
        },
    };

    converted.ok_or_else(|| CoercionError {
        expected: tag,
        found: value.describe(),
    })
}

/// Parses the date layouts a date field may have been stored with.
///
/// Accepts RFC 3339 (any offset, normalized to UTC), naive ISO date-times
/// (taken as UTC), `YYYY-MM-DD` and `MM/DD/YYYY`.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn date_from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64)
}

fn format_date(d: &DateTime<Utc>) -> String {
    let precision = if d.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    d.to_rfc3339_opts(precision, true)
}

fn date_to_json(d: &DateTime<Utc>) -> Option<serde_json::Value> {
    (0..=9999)
        .contains(&d.year())
        .then(|| serde_json::Value::String(format_date(d)))
}

fn is_safe_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER
}

fn format_number(n: f64) -> String {
    if is_safe_integer(n) {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

fn number_to_json(n: f64) -> Option<serde_json::Value> {
    if is_safe_integer(n) {
        return Some(serde_json::Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(serde_json::Value::Number)
}

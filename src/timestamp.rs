//! Normalization of the heterogeneous timestamp representations found on bookings.
//!
//! Depending on how a row was written, `created_at` / `updated_at` hold epoch seconds,
//! epoch milliseconds or a date string. [`StoredTimestamp`] reads whatever the column
//! holds without failing, [`Timestamp`] classifies the raw value once and renders it as
//! `YYYY-MM-DD HH:MM:SS` in UTC. Values that cannot be interpreted are displayed
//! verbatim; they are never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sea_orm::{
    ColIdx, QueryResult, TryGetError, TryGetable, Value,
    sea_query::{ArrayType, ColumnType, Nullable, ValueType, ValueTypeErr},
};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

/// Numeric values strictly below this are epoch seconds, everything else is epoch
/// milliseconds.
pub const SECONDS_THRESHOLD: i64 = 10_000_000_000;

/// Display format shared by every successfully parsed timestamp.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A stored timestamp, classified by representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Timestamp {
    /// Epoch seconds
    Seconds(i64),
    /// Epoch milliseconds
    Milliseconds(i64),
    /// A date string that parsed successfully
    IsoString(DateTime<Utc>),
    /// An in-memory date value
    Native(DateTime<Utc>),
    /// Anything else, kept in its raw string form
    Unparseable(String),
}

impl Timestamp {
    /// Classify an integer using [`SECONDS_THRESHOLD`].
    pub fn from_epoch(raw: i64) -> Self {
        if raw < SECONDS_THRESHOLD {
            Self::Seconds(raw)
        } else {
            Self::Milliseconds(raw)
        }
    }

    /// Fractional epoch values, seconds or milliseconds by the same threshold.
    pub fn from_real(raw: f64) -> Self {
        if !raw.is_finite() {
            return Self::Unparseable(raw.to_string());
        }
        let millis = if raw < SECONDS_THRESHOLD as f64 {
            raw * 1000.0
        } else {
            raw
        };
        if millis.abs() < i64::MAX as f64 {
            Self::Milliseconds(millis.round() as i64)
        } else {
            Self::Unparseable(raw.to_string())
        }
    }

    pub fn parse_str(raw: &str) -> Self {
        match parse_date_string(raw) {
            Some(at) => Self::IsoString(at),
            None => Self::Unparseable(raw.to_owned()),
        }
    }

    pub fn from_json(value: &Json) -> Self {
        match value {
            Json::Number(number) => match (number.as_i64(), number.as_f64()) {
                (Some(raw), _) => Self::from_epoch(raw),
                (None, Some(raw)) => Self::from_real(raw),
                (None, None) => Self::Unparseable(number.to_string()),
            },
            Json::String(raw) => Self::parse_str(raw),
            other => Self::Unparseable(other.to_string()),
        }
    }

    /// The instant this timestamp denotes, if it denotes one at all.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Seconds(secs) => secs
                .checked_mul(1000)
                .and_then(DateTime::from_timestamp_millis),
            Self::Milliseconds(millis) => DateTime::from_timestamp_millis(*millis),
            Self::IsoString(at) | Self::Native(at) => Some(*at),
            Self::Unparseable(_) => None,
        }
    }

    fn raw(&self) -> String {
        match self {
            Self::Seconds(raw) | Self::Milliseconds(raw) => raw.to_string(),
            Self::IsoString(at) | Self::Native(at) => at.to_rfc3339(),
            Self::Unparseable(raw) => raw.clone(),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Native(at)
    }
}

impl From<&Json> for Timestamp {
    fn from(value: &Json) -> Self {
        Self::from_json(value)
    }
}

impl From<&StoredTimestamp> for Timestamp {
    fn from(stored: &StoredTimestamp) -> Self {
        match stored {
            StoredTimestamp::Integer(raw) => Self::from_epoch(*raw),
            StoredTimestamp::Real(raw) => Self::from_real(*raw),
            StoredTimestamp::Text(raw) => Self::parse_str(raw),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(at) => write!(f, "{}", at.format(DISPLAY_FORMAT)),
            None => f.write_str(&self.raw()),
        }
    }
}

/// Render a stored timestamp for display, falling back to its raw form.
pub fn format_timestamp(value: impl Into<Timestamp>) -> String {
    value.into().to_string()
}

/// A timestamp column exactly as the store holds it.
///
/// SQLite keeps whatever storage class a writer used, so the column may contain an
/// integer, a real or text. Numeric text reads back as the number it spells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredTimestamp {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl StoredTimestamp {
    pub fn from_text(raw: String) -> Self {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Self::Integer(int);
        }
        match trimmed.parse::<f64>() {
            Ok(real) if real.is_finite() => Self::Real(real),
            _ => Self::Text(raw),
        }
    }
}

impl From<i64> for StoredTimestamp {
    fn from(raw: i64) -> Self {
        Self::Integer(raw)
    }
}

impl From<&str> for StoredTimestamp {
    fn from(raw: &str) -> Self {
        Self::from_text(raw.to_owned())
    }
}

impl From<StoredTimestamp> for Value {
    fn from(source: StoredTimestamp) -> Self {
        match source {
            StoredTimestamp::Integer(raw) => raw.into(),
            StoredTimestamp::Real(raw) => raw.into(),
            StoredTimestamp::Text(raw) => raw.into(),
        }
    }
}

impl TryGetable for StoredTimestamp {
    fn try_get_by<I: ColIdx>(res: &QueryResult, idx: I) -> Result<Self, TryGetError> {
        let text_err = match <String as TryGetable>::try_get_by(res, idx) {
            Ok(raw) => return Ok(Self::from_text(raw)),
            Err(err @ TryGetError::Null(_)) => return Err(err),
            Err(err) => err,
        };
        <i64 as TryGetable>::try_get_by(res, idx)
            .map(Self::Integer)
            .or_else(|_| <f64 as TryGetable>::try_get_by(res, idx).map(Self::Real))
            .or_else(|_| {
                <Vec<u8> as TryGetable>::try_get_by(res, idx)
                    .map(|raw| Self::Text(String::from_utf8_lossy(&raw).into_owned()))
            })
            .map_err(|_| text_err)
    }
}

impl ValueType for StoredTimestamp {
    fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
        match v {
            Value::BigInt(Some(raw)) => Ok(Self::Integer(raw)),
            Value::Int(Some(raw)) => Ok(Self::Integer(raw.into())),
            Value::Double(Some(raw)) => Ok(Self::Real(raw)),
            Value::Float(Some(raw)) => Ok(Self::Real(raw.into())),
            other => <String as ValueType>::try_from(other).map(Self::from_text),
        }
    }

    fn type_name() -> String {
        stringify!(StoredTimestamp).to_owned()
    }

    fn array_type() -> ArrayType {
        ArrayType::String
    }

    fn column_type() -> ColumnType {
        ColumnType::Text
    }
}

impl Nullable for StoredTimestamp {
    fn null() -> Value {
        <String as Nullable>::null()
    }
}

fn parse_date_string(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|at| at.and_utc());
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

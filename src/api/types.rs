use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, TcatError};

/// Field echoed back by TCAT in every response
pub const ORIGINAL_REQUEST_KEY: &str = "original_request";

/// A query bin: one saved capture definition on a TCAT instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryBin {
    pub bin: String,
    #[serde(rename = "type")]
    pub bin_type: String,
    pub active: bool,
    pub comments: String,
    pub notweets: i64,
    pub mintime: Option<DateTime<Utc>>,
    pub maxtime: Option<DateTime<Utc>>,
    pub nohashtags: i64,
    pub nomentions: i64,
    pub keywords: Vec<String>,
}

impl QueryBin {
    /// Build a query bin from the fields of a bin-detail response
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            bin: string_field(fields, "bin")?,
            bin_type: string_field(fields, "type")?,
            active: int_field(fields, "active")? != 0,
            comments: comments_field(fields)?,
            notweets: int_field(fields, "notweets")?,
            mintime: time_field(fields, "mintime")?,
            maxtime: time_field(fields, "maxtime")?,
            nohashtags: int_field(fields, "nohashtags")?,
            nomentions: int_field(fields, "nomentions")?,
            keywords: split_keywords(&string_field(fields, "keywords")?),
        })
    }

    /// Capture period covered by the bin, when both ends are known
    pub fn period(&self) -> Option<chrono::Duration> {
        match (self.mintime, self.maxtime) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Human-readable active state
    pub fn status_display(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            "inactive"
        }
    }
}

impl TryFrom<Map<String, Value>> for QueryBin {
    type Error = TcatError;

    fn try_from(fields: Map<String, Value>) -> Result<Self> {
        Self::from_fields(&fields)
    }
}

/// Export formats accepted by the tweet export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

/// Split a comma-separated keyword field, trimming every piece
pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',').map(|kw| kw.trim().to_string()).collect()
}

fn require<'a>(fields: &'a Map<String, Value>, name: &str) -> Result<&'a Value> {
    fields
        .get(name)
        .ok_or_else(|| TcatError::MissingField(name.to_string()))
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<String> {
    match require(fields, name)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(TcatError::invalid_field(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

fn comments_field(fields: &Map<String, Value>) -> Result<String> {
    match require(fields, "comments")? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => Err(TcatError::invalid_field(
            "comments",
            format!("expected a string, got {other}"),
        )),
    }
}

/// Integer coercion: accepts JSON integers, booleans and integer strings
fn int_field(fields: &Map<String, Value>, name: &str) -> Result<i64> {
    let value = require(fields, name)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        TcatError::invalid_field(name, format!("expected an integer, got {value}"))
    })
}

/// Timestamps degrade to `None` unless the raw value is a string
fn time_field(fields: &Map<String, Value>, name: &str) -> Result<Option<DateTime<Utc>>> {
    match fields.get(name) {
        Some(Value::String(s)) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| TcatError::invalid_field(name, format!("not an ISO-8601 date-time: {s:?}"))),
        _ => Ok(None),
    }
}

/// Parse an ISO-8601 date-time; values without an offset are taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Offsets without a colon (+0200) and a space separator
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, pattern) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

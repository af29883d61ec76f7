//! Best-effort reads from the `{status, code, message, data}` envelope the API wraps every body
//! in. Nothing here fails: a body that doesn't have the expected shape simply yields `None`.

use chrono::{NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::Display;

lazy_static! {
    static ref FRACTION_REGEX: Regex =
        Regex::new(r"^(?P<base>[^.]+)\.(?P<fraction>[0-9]+)(?P<rest>.*)$").unwrap();
    static ref OFFSET_REGEX: Regex =
        Regex::new(r"^(?P<local>.+?)(?:[Zz]|[+-][0-9]{2}:?[0-9]{2}(?::?[0-9]{2})?)$").unwrap();
}

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const CREATED_AT_FIELD: &str = "createdAt";
const ID_FIELD: &str = "id";

pub type Payload = Map<String, Value>;

/// Identifier of a server-side resource. Numbers stay numbers so they can be sent back in request
/// bodies unchanged.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(Number),
    Text(String),
}

impl ResourceId {
    /// Numbers and non-empty strings are identifiers. Zero, empty strings and every other JSON
    /// type are not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(ResourceId::Number(n.clone())),
            Value::String(s) if !s.is_empty() => Some(ResourceId::Text(s.clone())),
            _ => None,
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id.into())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.into())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Option<i64>,
    pub code: Option<String>,
    pub message: Option<String>,
}

pub fn extract_envelope(body: &str) -> Option<ResponseEnvelope> {
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body).ok()? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

pub fn extract_payload(body: &str) -> Option<Payload> {
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body).ok()? {
        Value::Object(mut envelope) => match envelope.remove("data")? {
            Value::Object(payload) => Some(payload),
            _ => None,
        },
        _ => None,
    }
}

pub fn field_str<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

pub fn extract_id(payload: &Payload) -> Option<ResourceId> {
    payload.get(ID_FIELD).and_then(ResourceId::from_value)
}

pub fn extract_created_at(payload: &Payload) -> Option<NaiveDateTime> {
    let created_at = field_str(payload, CREATED_AT_FIELD)?;

    parse_timestamp(created_at).map(truncate_to_micros)
}

/// Formats a timestamp the way the API accepts it in query parameters: no offset, and a
/// six-digit fraction only when there are sub-second microseconds.
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    if timestamp.nanosecond() / 1_000 == 0 {
        timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Accepts `T` or a space between date and time, minutes-only times and any fraction length.
/// A trailing `Z` or `±HH:MM` offset is dropped and the wall-clock time is kept.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let local = with_t_separator(strip_offset(text));

    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&local, format).ok())
        .or_else(|| parse_padded_fraction(&local))
}

fn strip_offset(text: &str) -> &str {
    OFFSET_REGEX
        .captures(text)
        .and_then(|captures| captures.name("local"))
        .map_or(text, |local| local.as_str())
}

fn with_t_separator(text: &str) -> String {
    match (text.get(..10), text.get(10..11), text.get(11..)) {
        (Some(date), Some(" "), Some(time)) => format!("{}T{}", date, time),
        _ => String::from(text),
    }
}

fn parse_padded_fraction(text: &str) -> Option<NaiveDateTime> {
    let captures = FRACTION_REGEX.captures(text)?;
    let mut fraction = String::from(&captures["fraction"]);
    fraction.push_str("000000");
    fraction.truncate(6);

    let normalized = format!("{}.{}{}", &captures["base"], fraction, &captures["rest"]);
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.6f").ok()
}

fn truncate_to_micros(timestamp: NaiveDateTime) -> NaiveDateTime {
    let micros = timestamp.nanosecond() / 1_000 * 1_000;
    timestamp.with_nanosecond(micros).unwrap_or(timestamp)
}

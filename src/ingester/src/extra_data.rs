//! Free-form daily notes.
//!
//! Users can append a JSON object to a daily description, e.g.
//! `Long day {"mood": "happy", "people": "Ann"}`. The object arrives either
//! inside a `daily_summary_YYYY-MM-DD.json` export or already split out as an
//! `extra_data_YYYY-MM-DD.json` file, and is imported into the
//! `daily_extra_data` table.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use common::Fields;
use common::Value;
use healthdb::tables::DAILY_EXTRA_DATA;
use healthdb::Store;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Map;
use tracing::debug;
use tracing::warn;

use crate::error::IngesterError;
use crate::error::Result;
use crate::projector::write_all;

lazy_static! {
    static ref DESCRIPTION: Regex = Regex::new(r"(?s)^(.*?)(\{.+\})\s*$").unwrap();
    static ref EXTRA_DATA_FILE: Regex =
        Regex::new(r"^extra_data_(\d{4}-\d{2}-\d{2})\.json$").unwrap();
    static ref SUMMARY_FILE: Regex =
        Regex::new(r"^daily_summary_(\d{4}-\d{2}-\d{2})\.json$").unwrap();
}

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Enum matched leniently from user input: by code, by exact name, or by the
/// name appearing anywhere in the input regardless of case.
pub trait FuzzyMatch: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn name(&self) -> &'static str;

    fn code(&self) -> i64;

    fn from_code(code: i64) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    fn from_string(s: &str) -> Option<Self> {
        if let Ok(code) = s.trim().parse::<i64>() {
            return Self::from_code(code);
        }
        if let Some(v) = Self::ALL.iter().copied().find(|v| v.name() == s) {
            return Some(v);
        }

        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|v| lower.contains(&v.name().to_lowercase()))
    }

    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Int(code) => Self::from_code(*code),
            Value::String(s) => Self::from_string(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Excited = 1,
    Happy,
    Good,
    Sad,
    Depressed,
}

impl FuzzyMatch for Mood {
    const ALL: &'static [Self] = &[
        Mood::Excited,
        Mood::Happy,
        Mood::Good,
        Mood::Sad,
        Mood::Depressed,
    ];

    fn name(&self) -> &'static str {
        match self {
            Mood::Excited => "Excited",
            Mood::Happy => "Happy",
            Mood::Good => "Good",
            Mood::Sad => "Sad",
            Mood::Depressed => "Depressed",
        }
    }

    fn code(&self) -> i64 {
        *self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Rested = 1,
    Healthy,
    Tired,
    Sick,
}

impl FuzzyMatch for Condition {
    const ALL: &'static [Self] = &[
        Condition::Rested,
        Condition::Healthy,
        Condition::Tired,
        Condition::Sick,
    ];

    fn name(&self) -> &'static str {
        match self {
            Condition::Rested => "Rested",
            Condition::Healthy => "Healthy",
            Condition::Tired => "Tired",
            Condition::Sick => "Sick",
        }
    }

    fn code(&self) -> i64 {
        *self as i64
    }
}

/// Splits a description into its text and the JSON object trailing it.
pub fn split_description(
    description: &str,
) -> Result<(String, Option<Map<String, serde_json::Value>>)> {
    let Some(caps) = DESCRIPTION.captures(description) else {
        return Ok((description.to_string(), None));
    };

    let text = caps.get(1).map_or("", |m| m.as_str()).trim_end().to_string();
    let json = caps.get(2).map_or("", |m| m.as_str());
    match serde_json::from_str::<serde_json::Value>(json)? {
        serde_json::Value::Object(extra) => Ok((text, Some(extra))),
        _ => Ok((description.to_string(), None)),
    }
}

/// Day an extra data or daily summary file belongs to, taken from its name.
pub fn day_from_file_name(name: &str) -> Option<NaiveDate> {
    let caps = EXTRA_DATA_FILE
        .captures(name)
        .or_else(|| SUMMARY_FILE.captures(name))?;
    NaiveDate::parse_from_str(caps.get(1)?.as_str(), DAY_FORMAT).ok()
}

pub fn is_extra_data_file(name: &str) -> bool {
    EXTRA_DATA_FILE.is_match(name)
}

pub fn is_summary_file(name: &str) -> bool {
    SUMMARY_FILE.is_match(name)
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), DAY_FORMAT).ok()
}

fn read_object(path: &Path) -> Result<Map<String, serde_json::Value>> {
    let reader = BufReader::new(File::open(path)?);
    match serde_json::from_reader::<_, serde_json::Value>(reader)? {
        serde_json::Value::Object(obj) => Ok(obj),
        _ => Err(IngesterError::Decode(format!(
            "{}: expected a JSON object",
            path.display()
        ))),
    }
}

/// Day of an object read from `path`: its `field` when present, the file name
/// otherwise.
fn day_of(path: &Path, obj: &Map<String, serde_json::Value>, field: &str) -> Result<NaiveDate> {
    obj.get(field)
        .and_then(serde_json::Value::as_str)
        .and_then(parse_day)
        .or_else(|| {
            path.file_name()
                .and_then(|n| n.to_str())
                .and_then(day_from_file_name)
        })
        .ok_or_else(|| IngesterError::malformed("extra_data", "no day"))
}

fn fuzzy<T: FuzzyMatch>(column: &str, v: Value) -> Value {
    if v.is_null() {
        return v;
    }
    match T::from_value(&v) {
        Some(m) => Value::from(m.name()),
        None => {
            warn!("unrecognized {column}: {v}");
            Value::Null
        }
    }
}

fn text(v: Value) -> Value {
    match v {
        Value::Null | Value::String(_) => v,
        Value::List(items) => Value::String(
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Value::String(other.to_string()),
    }
}

/// Normalizes an extra data object into a `daily_extra_data` row.
pub fn extra_data_fields(day: NaiveDate, extra: &Map<String, serde_json::Value>) -> Fields {
    let mut out = Fields::new();
    out.insert(
        "day".to_string(),
        Value::String(day.format(DAY_FORMAT).to_string()),
    );

    for (name, v) in extra {
        let v = Value::from(v.clone());
        let v = match name.as_str() {
            "day" => continue,
            "mood" => fuzzy::<Mood>(name, v),
            "condition" => fuzzy::<Condition>(name, v),
            "weather" | "text" | "people" => text(v),
            _ => {
                debug!("ignoring extra data field {name}");
                continue;
            }
        };
        out.insert(name.to_owned(), v);
    }

    out
}

/// Merges the extra data of `day` into its row.
pub fn import_daily_extra_data(
    store: &dyn Store,
    day: NaiveDate,
    extra: &Map<String, serde_json::Value>,
) -> Result<Fields> {
    let fields = extra_data_fields(day, extra);
    write_all(store, &[(&DAILY_EXTRA_DATA, fields.clone())])?;

    Ok(fields)
}

/// Imports one `extra_data_YYYY-MM-DD.json` file. The day comes from the
/// object's `day` field, or the file name when that is missing.
pub fn import_file<P: AsRef<Path>>(store: &dyn Store, path: P) -> Result<Fields> {
    let path = path.as_ref();
    let extra = read_object(path)?;
    let day = day_of(path, &extra, "day")?;

    import_daily_extra_data(store, day, &extra)
}

/// Imports the extra data embedded in the `wellnessDescription` of a
/// `daily_summary_YYYY-MM-DD.json` export. Returns `None` when the
/// description carries no extra data.
pub fn import_summary_file<P: AsRef<Path>>(store: &dyn Store, path: P) -> Result<Option<Fields>> {
    let path = path.as_ref();
    let summary = read_object(path)?;
    let Some(description) = summary
        .get("wellnessDescription")
        .and_then(serde_json::Value::as_str)
    else {
        return Ok(None);
    };

    let (text, extra) = split_description(description)?;
    let Some(extra) = extra else {
        return Ok(None);
    };
    let day = day_of(path, &summary, "calendarDate")?;
    debug!("{}: extra data for {} after {:?}", path.display(), day, text);

    import_daily_extra_data(store, day, &extra).map(Some)
}

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CommonError;
use crate::error::Result;

/// Sparse set of named values. A missing key is absent, a key mapped to
/// [`Value::Null`] is present but carries no data.
pub type Fields = BTreeMap<String, Value>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Display name of an enum-like value: names stay as they are, raw codes
    /// are rendered as their decimal string.
    pub fn to_name(&self) -> Value {
        match self {
            Value::String(_) => self.clone(),
            Value::Int(v) => Value::String(v.to_string()),
            Value::Bool(v) => Value::String(v.to_string()),
            _ => Value::Null,
        }
    }

    /// Order-preserving, type-tagged encoding used for natural keys.
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        let out = match self {
            Value::Bool(v) => vec![b'b', *v as u8],
            Value::Int(v) => [
                b"i".as_ref(),
                ((*v as u64) ^ (1 << 63)).to_be_bytes().as_ref(),
            ]
            .concat(),
            Value::Timestamp(v) => [
                b"t".as_ref(),
                ((v.timestamp_millis() as u64) ^ (1 << 63))
                    .to_be_bytes()
                    .as_ref(),
            ]
            .concat(),
            Value::String(v) => [b"s".as_ref(), v.as_bytes(), b"\0".as_ref()].concat(),
            Value::Null | Value::Float(_) | Value::List(_) => {
                return Err(CommonError::InvalidKey(self.to_string()));
            }
        };

        Ok(out)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v:?}"),
            Value::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            Value::List(v) => {
                write!(f, "[")?;
                for (idx, item) in v.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(v) => match v.as_i64() {
                Some(v) => Value::Int(v),
                None => v.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(v) => match DateTime::parse_from_rfc3339(v.as_str()) {
                Ok(ts) => Value::Timestamp(ts.with_timezone(&Utc)),
                Err(_) => Value::String(v),
            },
            serde_json::Value::Array(v) => Value::List(v.into_iter().map(Value::from).collect()),
            // nested objects carry no normalized data
            serde_json::Value::Object(_) => Value::Null,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            None => Value::Null,
            Some(v) => v.into(),
        }
    }
}

/// Drops null entries, leaving only fields that carry data.
pub fn non_null(fields: &Fields) -> Fields {
    fields
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}

#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($name.to_string(), $crate::Value::from($value));)+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_json_conversion() {
        let v: serde_json::Value = serde_json::json!({
            "a": 1,
            "b": 1.5,
            "c": "2024-01-02T03:04:05Z",
            "d": "walking",
            "e": [1, 2],
            "f": null,
        });
        let obj = v.as_object().unwrap().to_owned();
        let fields: Fields = obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect();

        assert_eq!(fields["a"], Value::Int(1));
        assert_eq!(fields["b"], Value::Float(1.5));
        assert_eq!(
            fields["c"],
            Value::Timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
        assert_eq!(fields["d"], Value::String("walking".to_string()));
        assert_eq!(fields["e"], Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert!(fields["f"].is_null());
    }

    #[rstest]
    #[case(Value::Int(-5), Value::Int(3))]
    #[case(Value::Int(3), Value::Int(300))]
    #[case(Value::String("a".to_string()), Value::String("b".to_string()))]
    fn test_key_bytes_order(#[case] lo: Value, #[case] hi: Value) {
        assert!(lo.key_bytes().unwrap() < hi.key_bytes().unwrap());
    }

    #[test]
    fn test_key_bytes_rejects_non_scalar_keys() {
        assert!(Value::Null.key_bytes().is_err());
        assert!(Value::Float(1.0).key_bytes().is_err());
        assert!(Value::List(vec![]).key_bytes().is_err());
    }

    #[test]
    fn test_non_null() {
        let f = fields! {"a" => 1i64, "b" => Value::Null};
        let res = non_null(&f);
        assert_eq!(res.len(), 1);
        assert!(res.contains_key("a"));
    }
}

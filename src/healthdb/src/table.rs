use common::Fields;
use common::Value;

use crate::error::DbError;
use crate::Result;

/// Logical store a table lives in. Every store is a separate database with
/// its own transaction per ingested file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreKind {
    Garmin,
    Monitoring,
    Activities,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    /// Integer that must not be negative.
    UInt,
    Float,
    String,
    Timestamp,
    Bool,
    /// Any scalar.
    Any,
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

pub const fn col(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub store: StoreKind,
    pub columns: &'static [Column],
    pub key: &'static [&'static str],
}

#[derive(Clone, Debug, PartialEq)]
pub struct NaturalKey(pub Vec<Value>);

impl NaturalKey {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for part in &self.0 {
            out.extend(part.key_bytes()?);
        }

        Ok(out)
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.key.contains(&name)
    }

    pub fn natural_key(&self, fields: &Fields) -> Result<NaturalKey> {
        let parts = self
            .key
            .iter()
            .map(|name| match fields.get(*name) {
                None | Some(Value::Null) => Err(DbError::MissingKey(format!(
                    "{}.{}",
                    self.name, name
                ))),
                Some(v) => Ok(v.to_owned()),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NaturalKey(parts))
    }

    pub fn key_fields(&self, key: &NaturalKey) -> Result<Fields> {
        if key.0.len() != self.key.len() {
            return Err(DbError::MissingKey(format!(
                "{} expects {} key parts, got {}",
                self.name,
                self.key.len(),
                key.0.len()
            )));
        }

        Ok(self
            .key
            .iter()
            .zip(key.0.iter())
            .map(|(name, v)| (name.to_string(), v.to_owned()))
            .collect())
    }

    /// Checks the fields against the schema and returns them coerced to the
    /// column kinds. Null values pass through untouched.
    pub fn validate(&self, fields: &Fields) -> Result<Fields> {
        let mut out = Fields::new();
        for (name, value) in fields {
            let column = self
                .column(name)
                .ok_or_else(|| DbError::UnknownColumn(format!("{}.{}", self.name, name)))?;
            out.insert(name.to_owned(), self.coerce(column, value)?);
        }

        Ok(out)
    }

    fn coerce(&self, column: &Column, value: &Value) -> Result<Value> {
        let coerced = match (column.kind, value) {
            (_, Value::Null) => Some(Value::Null),
            (_, Value::List(_)) => None,
            (ColumnKind::Any, v) => Some(v.to_owned()),
            (ColumnKind::Int, Value::Int(_)) => Some(value.to_owned()),
            (ColumnKind::UInt, Value::Int(v)) if *v >= 0 => Some(value.to_owned()),
            (ColumnKind::Float, Value::Int(v)) => Some(Value::Float(*v as f64)),
            (ColumnKind::Float, Value::Float(v)) if v.is_finite() => Some(value.to_owned()),
            (ColumnKind::String, Value::String(_)) => Some(value.to_owned()),
            (ColumnKind::Timestamp, Value::Timestamp(_)) => Some(value.to_owned()),
            (ColumnKind::Bool, Value::Bool(_)) => Some(value.to_owned()),
            _ => None,
        };

        coerced.ok_or_else(|| {
            DbError::InvalidValue(format!(
                "{}.{} ({:?}): {}",
                self.name, column.name, column.kind, value
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use common::fields;
    use common::Value;

    use crate::error::DbError;
    use crate::tables;

    #[test]
    fn test_natural_key() {
        let key = tables::ACTIVITY_LAPS
            .natural_key(&fields! {"activity_id" => "a1", "lap" => 2i64, "distance" => 1.5})
            .unwrap();
        assert_eq!(key.0, vec![Value::from("a1"), Value::Int(2)]);

        let err = tables::ACTIVITY_LAPS
            .natural_key(&fields! {"activity_id" => "a1", "lap" => Value::Null})
            .unwrap_err();
        assert!(matches!(err, DbError::MissingKey(_)));
    }

    #[test]
    fn test_validate_coerces_ints_to_floats() {
        let res = tables::MONITORING_CLIMB
            .validate(&fields! {"ascent" => 3i64})
            .unwrap();
        assert_eq!(res["ascent"], Value::Float(3.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for bad in [
            fields! {"steps" => -5i64},
            fields! {"steps" => "many"},
            fields! {"steps" => Value::List(vec![Value::Int(1)])},
        ] {
            let err = tables::MONITORING.validate(&bad).unwrap_err();
            assert!(matches!(err, DbError::InvalidValue(_)), "{bad:?}");
        }

        let err = tables::MONITORING
            .validate(&fields! {"no_such_column" => 1i64})
            .unwrap_err();
        assert!(matches!(err, DbError::UnknownColumn(_)));
    }
}

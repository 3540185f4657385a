//! Field lookup honoring developer-defined extension fields.
//!
//! Extension fields shadow the standard field of the same name: `dev_steps`
//! wins over `steps` whenever it carries a value. Null counts as absent, so a
//! null extension falls through to the standard field.

use common::Fields;
use common::Value;

pub const EXTENSION_PREFIX: &str = "dev_";

pub fn resolve<'a>(fields: &'a Fields, name: &str) -> Option<&'a Value> {
    let present = |key: &str| fields.get(key).filter(|v| !v.is_null());

    present(&format!("{EXTENSION_PREFIX}{name}")).or_else(|| present(name))
}

/// First name in `names` that resolves to a value.
pub fn resolve_first<'a>(fields: &'a Fields, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| resolve(fields, name))
}

/// Resolved value, or null when nothing carries data.
pub fn value(fields: &Fields, name: &str) -> Value {
    resolve(fields, name).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use common::fields;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(fields!{"dev_steps" => 10i64, "steps" => 5i64}, Some(Value::Int(10)))]
    #[case(fields!{"steps" => 5i64}, Some(Value::Int(5)))]
    #[case(fields!{"dev_steps" => Value::Null, "steps" => 5i64}, Some(Value::Int(5)))]
    #[case(fields!{"dev_steps" => 10i64}, Some(Value::Int(10)))]
    #[case(fields!{"steps" => Value::Null}, None)]
    #[case(fields!{}, None)]
    fn test_resolve(#[case] fields: Fields, #[case] exp: Option<Value>) {
        assert_eq!(resolve(&fields, "steps").cloned(), exp);
    }

    #[test]
    fn test_resolve_first() {
        let f = fields! {"distance" => 3.5, "dev_distance" => 4.0};
        assert_eq!(
            resolve_first(&f, &["User_distance", "distance"]),
            Some(&Value::Float(4.0))
        );
        assert_eq!(resolve_first(&f, &["missing"]), None);
        assert_eq!(value(&f, "missing"), Value::Null);
    }
}

//! Unit conversions for derived activity metrics.

use common::Value;

/// Seconds per distance unit for a speed given in distance units per hour.
/// Zero and missing speeds have no pace.
pub fn speed_to_pace(speed: Option<&Value>) -> Value {
    match speed.and_then(Value::as_f64) {
        Some(v) if v > 0.0 => Value::Float(3600.0 / v),
        _ => Value::Null,
    }
}

/// Running cadence is reported per leg, steps per minute count both.
pub fn cadence_to_steps_per_min(cadence: Option<&Value>) -> Value {
    match cadence.and_then(Value::as_i64) {
        Some(v) if v >= 0 => v.checked_mul(2).map(Value::Int).unwrap_or(Value::Null),
        _ => match cadence.and_then(Value::as_f64) {
            Some(v) if v >= 0.0 => Value::Int((v * 2.0).round() as i64),
            _ => Value::Null,
        },
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some(Value::Float(10.0)), Value::Float(360.0))]
    #[case(Some(Value::Int(12)), Value::Float(300.0))]
    #[case(Some(Value::Float(0.0)), Value::Null)]
    #[case(None, Value::Null)]
    fn test_speed_to_pace(#[case] speed: Option<Value>, #[case] exp: Value) {
        assert_eq!(speed_to_pace(speed.as_ref()), exp);
    }

    #[rstest]
    #[case(Some(Value::Int(85)), Value::Int(170))]
    #[case(Some(Value::Float(85.5)), Value::Int(171))]
    #[case(Some(Value::Int(i64::MAX)), Value::Null)]
    #[case(None, Value::Null)]
    fn test_cadence(#[case] cadence: Option<Value>, #[case] exp: Value) {
        assert_eq!(cadence_to_steps_per_min(cadence.as_ref()), exp);
    }
}

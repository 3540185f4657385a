use common::fields;
use common::Fields;
use common::Value;
use healthdb::tables::MONITORING;
use healthdb::tables::MONITORING_CLIMB;
use healthdb::tables::MONITORING_HR;
use healthdb::tables::MONITORING_INFO;
use healthdb::tables::MONITORING_INTENSITY;
use healthdb::Table;
use tracing::trace;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::IngesterError;
use crate::error::Result;
use crate::projector::write_all;
use crate::projector::write_projections;
use crate::record::Record;
use crate::resolver::value;

/// Tables a monitoring sample is projected onto.
pub static MONITORING_TABLES: [&Table; 4] = [
    &MONITORING_HR,
    &MONITORING_INTENSITY,
    &MONITORING_CLIMB,
    &MONITORING,
];

/// Spreads a sample over the monitoring tables. Each table only receives the
/// fields it declares, and only when they go beyond its key.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let mut fields = record.to_fields(true);
    // a zero heart rate is a placeholder for "no reading"
    if !fields
        .get("heart_rate")
        .and_then(Value::as_f64)
        .is_some_and(|hr| hr > 0.0)
    {
        fields.remove("heart_rate");
    }

    let written = write_projections(env.store, &MONITORING_TABLES, &fields)?;
    trace!(
        "{}: monitoring sample written to {:?}",
        ctx.file_name,
        written.iter().map(|t| t.name).collect::<Vec<_>>()
    );

    Ok(())
}

/// Element `idx` of a parallel array. Scalars apply to every element.
fn element_at(v: &Value, idx: usize) -> Value {
    match v.as_list() {
        Some(items) => items.get(idx).cloned().unwrap_or(Value::Null),
        None => v.clone(),
    }
}

/// Writes one monitoring_info row per activity type. The per activity
/// conversion factors are read from arrays parallel to `activity_type`.
pub fn handle_info(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let fields = record.fields();
    let activity_types = match fields.get("activity_type") {
        None | Some(Value::Null) => {
            return Err(IngesterError::malformed(
                &record.record_type,
                "missing activity_type",
            ));
        }
        Some(Value::List(items)) => items.clone(),
        Some(v) => vec![v.clone()],
    };

    let timestamp = value(fields, "local_timestamp");
    let cycles_to_distance = value(fields, "cycles_to_distance");
    let cycles_to_calories = value(fields, "cycles_to_calories");
    let rows: Vec<(&Table, Fields)> = activity_types
        .iter()
        .enumerate()
        .map(|(idx, activity_type)| {
            (
                &MONITORING_INFO,
                fields! {
                    "file_id" => ctx.file_id.as_str(),
                    "timestamp" => timestamp.clone(),
                    "activity_type" => activity_type.clone(),
                    "resting_metabolic_rate" => value(fields, "resting_metabolic_rate"),
                    "cycles_to_distance" => element_at(&cycles_to_distance, idx),
                    "cycles_to_calories" => element_at(&cycles_to_calories, idx),
                },
            )
        })
        .collect();

    write_all(env.store, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_at() {
        let list = Value::List(vec![Value::Float(1.0), Value::Float(2.0)]);
        assert_eq!(element_at(&list, 1), Value::Float(2.0));
        assert_eq!(element_at(&list, 2), Value::Null);
        assert_eq!(element_at(&Value::Float(3.0), 5), Value::Float(3.0));
    }
}

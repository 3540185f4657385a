use chrono::DateTime;
use chrono::Utc;
use common::fields;
use common::Value;

use crate::store::Store;
use crate::table::NaturalKey;
use crate::tables::ATTRIBUTES;
use crate::Result;

/// Stores `value` under `name` unless the stored value carries a newer
/// timestamp. Returns whether the attribute was written.
pub fn set_newer(
    store: &dyn Store,
    name: &str,
    value: Value,
    timestamp: DateTime<Utc>,
) -> Result<bool> {
    let key = NaturalKey(vec![Value::from(name)]);
    if let Some(current) = store.find_by_key(&ATTRIBUTES, &key)? {
        if let Some(ts) = current.get("timestamp").and_then(Value::as_timestamp) {
            if ts > timestamp {
                return Ok(false);
            }
        }
    }

    store.upsert(
        &ATTRIBUTES,
        &key,
        &fields! {"value" => value, "timestamp" => timestamp},
    )?;
    Ok(true)
}

//! Per record type handlers. Each one reads a decoded record and writes the
//! rows it maps to.

use common::Fields;
use common::Value;
use tracing::debug;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::record::Record;
use crate::resolver::resolve;
use crate::resolver::resolve_first;
use crate::resolver::value;

pub mod device_info;
pub mod file_id;
pub mod lap;
pub mod monitoring;
pub mod record;
pub mod session;
pub mod sports;
pub mod stress;
pub mod user_profile;

/// Types that carry nothing worth storing.
pub fn log_record(_env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    debug!(
        "{}: {} record: {:?}",
        ctx.file_name,
        record.record_type,
        record.fields()
    );
    Ok(())
}

pub fn log_unhandled(_env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    debug!("{}: no handler for {} record", ctx.file_name, record.record_type);
    Ok(())
}

/// Enum-like field rendered as its name.
pub(crate) fn name_of(fields: &Fields, name: &str) -> Value {
    resolve(fields, name).map(Value::to_name).unwrap_or(Value::Null)
}

/// Summary metrics shared by sessions and laps, keyed by column name.
pub(crate) fn summary_fields(fields: &Fields) -> Fields {
    let mut out = Fields::new();
    let mut put = |column: &str, v: Value| {
        out.insert(column.to_string(), v);
    };

    put("start_time", value(fields, "start_time"));
    put("stop_time", value(fields, "timestamp"));
    put("elapsed_time", value(fields, "total_elapsed_time"));
    put("moving_time", value(fields, "total_timer_time"));
    put("start_lat", value(fields, "start_position_lat"));
    put("start_long", value(fields, "start_position_long"));
    put("stop_lat", value(fields, "end_position_lat"));
    put("stop_long", value(fields, "end_position_long"));
    put(
        "distance",
        resolve_first(fields, &["User_distance", "total_distance"])
            .cloned()
            .unwrap_or(Value::Null),
    );
    put("cycles", value(fields, "total_cycles"));
    put("avg_hr", value(fields, "avg_heart_rate"));
    put("max_hr", value(fields, "max_heart_rate"));
    put("calories", value(fields, "total_calories"));
    put("avg_cadence", value(fields, "avg_cadence"));
    put("max_cadence", value(fields, "max_cadence"));
    put("avg_speed", value(fields, "avg_speed"));
    put("max_speed", value(fields, "max_speed"));
    put("ascent", value(fields, "total_ascent"));
    put("descent", value(fields, "total_descent"));
    put("max_temperature", value(fields, "max_temperature"));
    put("avg_temperature", value(fields, "avg_temperature"));

    out
}

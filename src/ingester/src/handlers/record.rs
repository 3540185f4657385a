use common::fields;
use healthdb::tables::ACTIVITY_RECORDS;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::projector::write_all;
use crate::record::Record;
use crate::resolver::value;

/// Writes a sample under the next record number.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let f = record.fields();
    let row = fields! {
        "activity_id" => ctx.file_id.as_str(),
        "record" => ctx.record() as i64,
        "timestamp" => value(f, "timestamp"),
        "position_lat" => value(f, "position_lat"),
        "position_long" => value(f, "position_long"),
        "distance" => value(f, "distance"),
        "cadence" => value(f, "cadence"),
        "hr" => value(f, "heart_rate"),
        "altitude" => value(f, "altitude"),
        "speed" => value(f, "speed"),
        "temperature" => value(f, "temperature"),
    };

    write_all(env.store, &[(&ACTIVITY_RECORDS, row)])?;
    ctx.advance_record();

    Ok(())
}

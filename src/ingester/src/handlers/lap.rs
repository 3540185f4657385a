use common::Value;
use healthdb::tables::ACTIVITY_LAPS;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::handlers::summary_fields;
use crate::projector::write_all;
use crate::record::Record;

/// Writes the lap under the next lap number. The number only advances once
/// the row is written, so skipped laps leave no gaps.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let mut lap = summary_fields(record.fields());
    lap.insert("activity_id".to_string(), Value::from(ctx.file_id.as_str()));
    lap.insert("lap".to_string(), Value::Int(ctx.lap() as i64));

    write_all(env.store, &[(&ACTIVITY_LAPS, lap)])?;
    ctx.advance_lap();

    Ok(())
}

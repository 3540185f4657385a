use common::fields;
use healthdb::tables::STRESS;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::projector::write_all;
use crate::record::Record;
use crate::resolver::value;

pub fn handle(env: &Env<'_>, _ctx: &mut FileContext, record: &Record) -> Result<()> {
    let fields = record.fields();
    write_all(
        env.store,
        &[(
            &STRESS,
            fields! {
                "timestamp" => value(fields, "stress_level_time"),
                "stress" => value(fields, "stress_level_value"),
            },
        )],
    )
}

use healthdb::attributes;
use tracing::debug;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::record::Record;
use crate::resolver::resolve;

/// Profile settings kept as attributes.
pub const PROFILE_ATTRIBUTES: [&str; 10] = [
    "gender",
    "height",
    "weight",
    "language",
    "dist_setting",
    "weight_setting",
    "position_setting",
    "elev_setting",
    "sleep_time",
    "wake_time",
];

/// Stores profile settings as attributes stamped with the file's creation
/// time, so an older file never overwrites a newer setting.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let Some(timestamp) = env.file.time_created() else {
        debug!("{}: user_profile without file creation time", ctx.file_name);
        return Ok(());
    };

    let fields = record.fields();
    for name in PROFILE_ATTRIBUTES {
        if let Some(v) = resolve(fields, name) {
            attributes::set_newer(env.store, name, v.to_owned(), timestamp)?;
        }
    }

    Ok(())
}

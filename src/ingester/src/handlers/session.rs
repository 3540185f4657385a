use common::Value;
use healthdb::tables::ACTIVITIES;

use crate::context::FileContext;
use crate::dispatch::Env;
use crate::error::Result;
use crate::handlers::name_of;
use crate::handlers::sports;
use crate::handlers::summary_fields;
use crate::record::Record;
use crate::resolver::value;

/// Writes the activity summary and the details of its sport.
///
/// Sport and sub sport are treated as better known by other sources: values
/// already stored for the fields in `Env::preserve_fields` are kept.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let fields = record.fields();
    let activity_id = ctx.file_id.as_str();

    let sub_type = record.sub_type.clone().unwrap_or_default();
    let sport = sub_type
        .sport
        .or_else(|| name_of(fields, "sport").as_str().map(str::to_string));
    let sub_sport = sub_type
        .sub_sport
        .or_else(|| name_of(fields, "sub_sport").as_str().map(str::to_string));

    let mut activity = summary_fields(fields);
    let mut put = |column: &str, v: Value| {
        activity.insert(column.to_string(), v);
    };
    put("activity_id", Value::from(activity_id));
    put("sport", Value::from(sport.clone()));
    put("sub_sport", Value::from(sub_sport.clone()));
    put("laps", value(fields, "num_laps"));
    put("training_effect", value(fields, "total_training_effect"));
    put(
        "anaerobic_training_effect",
        value(fields, "total_anaerobic_training_effect"),
    );

    let activity = ACTIVITIES.validate(&activity)?;
    let detail = match sports::detail_row(
        activity_id,
        sport.as_deref(),
        sub_sport.as_deref(),
        fields,
    ) {
        Some((table, row)) => Some((table, table.validate(&row)?)),
        None => None,
    };

    env.store
        .upsert_preserving(&ACTIVITIES, &activity, env.preserve_fields)?;
    if let Some((table, row)) = detail {
        env.store.upsert_fields(table, &row)?;
    }

    Ok(())
}

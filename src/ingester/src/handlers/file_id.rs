use common::fields;
use common::Value;
use healthdb::tables::DEVICES;
use healthdb::tables::FILES;

use crate::context::FileContext;
use crate::context::PrimaryDevice;
use crate::dispatch::Env;
use crate::error::Result;
use crate::handlers::name_of;
use crate::projector::write_all;
use crate::record::Record;
use crate::resolver::resolve;
use crate::resolver::resolve_first;

/// Registers the file and, when the record names one, its primary device.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let fields = record.fields();
    let serial_number = resolve(fields, "serial_number").and_then(Value::as_i64);
    let primary = serial_number.map(|serial_number| PrimaryDevice {
        serial_number,
        manufacturer: name_of(fields, "manufacturer"),
        product: resolve_first(fields, &["product", "garmin_product"])
            .map(Value::to_name)
            .unwrap_or(Value::Null),
    });

    let mut rows = vec![];
    if let Some(primary) = &primary {
        rows.push((
            &DEVICES,
            fields! {
                "serial_number" => primary.serial_number,
                "timestamp" => env.file.time_created(),
                "manufacturer" => primary.manufacturer.clone(),
                "product" => primary.product.clone(),
            },
        ));
    }
    rows.push((
        &FILES,
        fields! {
            "id" => ctx.file_id.as_str(),
            "name" => ctx.file_name.as_str(),
            "type" => name_of(fields, "type"),
            "serial_number" => serial_number,
        },
    ));

    // local devices inherit from the primary even when this record is skipped
    if let Some(primary) = primary {
        ctx.set_primary(primary);
    }

    write_all(env.store, &rows)
}

#[cfg(test)]
mod tests {
    use common::Fields;
    use healthdb::error::DbError;
    use healthdb::NaturalKey;
    use healthdb::Store;
    use healthdb::Table;

    use super::*;
    use crate::record::DecodedFile;
    use crate::record::FitFile;
    use crate::record::RecordType;

    /// Rejects every write as invalid data.
    struct RejectingStore;

    impl Store for RejectingStore {
        fn find_by_key(&self, _: &Table, _: &NaturalKey) -> healthdb::Result<Option<Fields>> {
            Ok(None)
        }

        fn upsert(&self, table: &Table, _: &NaturalKey, _: &Fields) -> healthdb::Result<Fields> {
            Err(DbError::InvalidValue(table.name.to_string()))
        }

        fn rows(&self, _: &Table) -> healthdb::Result<Vec<Fields>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_primary_is_set_when_write_fails() {
        let file = DecodedFile::new("/in/1001.fit");
        let env = Env {
            store: &RejectingStore,
            file: &file,
            preserve_fields: &[],
        };
        let mut ctx = FileContext::new(file.path());
        let record = Record::new(
            RecordType::FileId,
            fields! {"serial_number" => 100i64, "manufacturer" => "garmin", "product" => 2697i64},
        );

        let err = handle(&env, &mut ctx, &record).unwrap_err();
        assert!(err.is_record_level());

        let primary = ctx.primary().unwrap();
        assert_eq!(primary.serial_number, 100);
        assert_eq!(primary.manufacturer, Value::from("garmin"));
        assert_eq!(primary.product, Value::from("2697"));
    }
}

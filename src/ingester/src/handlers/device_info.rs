use common::fields;
use common::Value;
use healthdb::tables::DEVICES;
use healthdb::tables::DEVICE_INFO;
use tracing::warn;

use crate::context::FileContext;
use crate::device::is_local_source;
use crate::device::local_device_serial_number;
use crate::dispatch::Env;
use crate::error::Result;
use crate::handlers::name_of;
use crate::projector::write_all;
use crate::record::Record;
use crate::resolver::resolve;
use crate::resolver::value;

/// Records a device and the state it reported.
///
/// Sensors local to the primary device report no identity of their own. Their
/// serial number is derived from the primary's, and missing manufacturer and
/// product are inherited from it.
pub fn handle(env: &Env<'_>, ctx: &mut FileContext, record: &Record) -> Result<()> {
    let fields = record.fields();
    let device_type = value(fields, "device_type");
    let mut serial_number = resolve(fields, "serial_number").and_then(Value::as_i64);
    let mut manufacturer = name_of(fields, "manufacturer");
    let mut product = name_of(fields, "product");

    if is_local_source(fields.get("source_type")) {
        if let Some(primary) = ctx.primary() {
            if serial_number.is_none() {
                serial_number = local_device_serial_number(primary.serial_number, &device_type);
            }
            if manufacturer.is_null() {
                manufacturer = primary.manufacturer.clone();
            }
            if product.is_null() {
                product = primary.product.clone();
            }
        }
    }

    let Some(serial_number) = serial_number else {
        warn!(
            "{}: device_info without serial number, not written: {:?}",
            ctx.file_name, fields
        );
        return Ok(());
    };

    let timestamp = value(fields, "timestamp");
    write_all(
        env.store,
        &[
            (
                &DEVICES,
                fields! {
                    "serial_number" => serial_number,
                    "timestamp" => timestamp.clone(),
                    "manufacturer" => manufacturer,
                    "product" => product,
                    "hardware_version" => value(fields, "hardware_version"),
                },
            ),
            (
                &DEVICE_INFO,
                fields! {
                    "file_id" => ctx.file_id.as_str(),
                    "serial_number" => serial_number,
                    "device_type" => device_type.to_name(),
                    "timestamp" => timestamp,
                    "cum_operating_time" => value(fields, "cum_operating_time"),
                    "battery_voltage" => value(fields, "battery_voltage"),
                    "software_version" => value(fields, "software_version"),
                },
            ),
        ],
    )
}

//! Device identity helpers.

use std::hash::Hasher;

use common::Value;
use siphasher::sip::SipHasher13;

/// Serial numbers of local sensors are derived as
/// `primary * LOCAL_SERIAL_SPACE + device_type`.
pub const LOCAL_SERIAL_SPACE: i64 = 1_000_000;

/// Serial number for a sensor embedded in the primary device. Such sensors
/// report no serial of their own.
///
/// Numeric device types are used as they are, named ones are hashed into the
/// same range. Returns `None` when the type is missing or the result overflows.
pub fn local_device_serial_number(primary: i64, device_type: &Value) -> Option<i64> {
    let code = match device_type {
        Value::Int(v) if (0..LOCAL_SERIAL_SPACE).contains(v) => *v,
        Value::String(name) => {
            let mut hasher = SipHasher13::new();
            hasher.write(name.as_bytes());
            (hasher.finish() % LOCAL_SERIAL_SPACE as u64) as i64
        }
        _ => return None,
    };

    primary.checked_mul(LOCAL_SERIAL_SPACE)?.checked_add(code)
}

/// Raw code of the `local` source type.
const LOCAL_SOURCE_CODE: i64 = 5;

/// Whether a device_info record describes a sensor local to the primary
/// device. Decoders report the source type by name or by its raw code.
pub fn is_local_source(source_type: Option<&Value>) -> bool {
    match source_type {
        Some(Value::String(v)) => v == "local",
        Some(Value::Int(v)) => *v == LOCAL_SOURCE_CODE,
        _ => false,
    }
}

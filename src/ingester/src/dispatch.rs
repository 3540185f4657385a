//! Routing of decoded records to their handlers.

use std::collections::HashMap;

use healthdb::Store;
use tracing::debug;
use tracing::warn;

use crate::context::FileContext;
use crate::error::Result;
use crate::handlers;
use crate::record::FitFile;
use crate::record::Record;
use crate::record::RecordType;

/// Record types that establish file and device identity. They are handled
/// before anything else, in this order.
pub const PRIORITY_TYPES: [RecordType; 2] = [RecordType::FileId, RecordType::DeviceInfo];

/// What a handler sees besides its record and the per-file context.
pub struct Env<'a> {
    pub store: &'a dyn Store,
    pub file: &'a dyn FitFile,
    /// Activity fields never overwritten once they hold a value.
    pub preserve_fields: &'a [String],
}

pub type RecordHandler = fn(&Env<'_>, &mut FileContext, &Record) -> Result<()>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub records: usize,
    pub skipped: usize,
    pub unhandled: usize,
}

pub struct Dispatcher {
    handlers: HashMap<RecordType, RecordHandler>,
    fallback: RecordHandler,
}

impl Default for Dispatcher {
    fn default() -> Self {
        let mut map: HashMap<RecordType, RecordHandler> = HashMap::new();
        map.insert(RecordType::FileId, handlers::file_id::handle);
        map.insert(RecordType::DeviceInfo, handlers::device_info::handle);
        map.insert(RecordType::Session, handlers::session::handle);
        map.insert(RecordType::Lap, handlers::lap::handle);
        map.insert(RecordType::Record, handlers::record::handle);
        map.insert(RecordType::MonitoringInfo, handlers::monitoring::handle_info);
        map.insert(RecordType::Monitoring, handlers::monitoring::handle);
        map.insert(RecordType::StressLevel, handlers::stress::handle);
        map.insert(RecordType::UserProfile, handlers::user_profile::handle);
        for t in [
            RecordType::Event,
            RecordType::Software,
            RecordType::FileCreator,
            RecordType::Sport,
            RecordType::Sensor,
            RecordType::Source,
            RecordType::DeviceSettings,
            RecordType::Battery,
            RecordType::Activity,
            RecordType::ZonesTarget,
            RecordType::DevDataId,
            RecordType::FieldDescription,
        ] {
            map.insert(t, handlers::log_record);
        }

        Dispatcher::new(map, handlers::log_unhandled)
    }
}

impl Dispatcher {
    pub fn new(handlers: HashMap<RecordType, RecordHandler>, fallback: RecordHandler) -> Self {
        Self { handlers, fallback }
    }

    pub fn handler(&self, record_type: &RecordType) -> Option<RecordHandler> {
        self.handlers.get(record_type).copied()
    }

    /// Priority types that are present, then every other type in order of
    /// first appearance.
    pub fn order(record_types: &[RecordType]) -> Vec<RecordType> {
        let mut out: Vec<RecordType> = PRIORITY_TYPES
            .iter()
            .filter(|t| record_types.contains(*t))
            .cloned()
            .collect();
        out.extend(
            record_types
                .iter()
                .filter(|t| !PRIORITY_TYPES.contains(*t))
                .cloned(),
        );

        out
    }

    /// Hands every record of `file` to its handler. Records whose content is
    /// malformed are skipped with a warning, any other error aborts the file.
    pub fn dispatch(
        &self,
        env: &Env<'_>,
        ctx: &mut FileContext,
        file: &dyn FitFile,
    ) -> Result<IngestStats> {
        let mut stats = IngestStats::default();
        for record_type in Self::order(&file.record_types()) {
            let records = file.records_of(&record_type)?;
            let handler = match self.handler(&record_type) {
                Some(handler) => handler,
                None => {
                    stats.unhandled += records.len();
                    self.fallback
                }
            };
            debug!(
                "{}: {} {} records",
                ctx.file_name,
                records.len(),
                record_type
            );

            for record in &records {
                match handler(env, ctx, record) {
                    Ok(()) => stats.records += 1,
                    Err(err) if err.is_record_level() => {
                        warn!(
                            "{}: skipping {} record: {}: {:?}",
                            ctx.file_name,
                            record_type,
                            err,
                            record.fields()
                        );
                        stats.skipped += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        Ok(stats)
    }
}

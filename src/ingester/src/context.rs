use std::path::Path;

use common::Value;
use healthdb::file_id_from_path;
use healthdb::file_name_from_path;

/// Identity of the device that produced the file, taken from its file_id
/// record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaryDevice {
    pub serial_number: i64,
    pub manufacturer: Value,
    pub product: Value,
}

/// State scoped to the ingestion of one file. A fresh context is created for
/// every file, nothing carries over.
#[derive(Debug, Clone)]
pub struct FileContext {
    pub file_id: String,
    pub file_name: String,
    lap: u64,
    record: u64,
    primary: Option<PrimaryDevice>,
}

impl FileContext {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileContext {
            file_id: file_id_from_path(&path),
            file_name: file_name_from_path(&path),
            lap: 1,
            record: 1,
            primary: None,
        }
    }

    /// Sequence number the next written lap gets.
    pub fn lap(&self) -> u64 {
        self.lap
    }

    pub fn advance_lap(&mut self) {
        self.lap += 1;
    }

    /// Sequence number the next written record gets.
    pub fn record(&self) -> u64 {
        self.record
    }

    pub fn advance_record(&mut self) {
        self.record += 1;
    }

    pub fn primary(&self) -> Option<&PrimaryDevice> {
        self.primary.as_ref()
    }

    pub fn set_primary(&mut self, primary: PrimaryDevice) {
        self.primary = Some(primary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_one() {
        let mut ctx = FileContext::new("/data/12345_ACTIVITY.fit");
        assert_eq!(ctx.file_id, "12345_ACTIVITY");
        assert_eq!(ctx.file_name, "12345_ACTIVITY.fit");
        assert_eq!((ctx.lap(), ctx.record()), (1, 1));

        ctx.advance_lap();
        ctx.advance_record();
        ctx.advance_record();
        assert_eq!((ctx.lap(), ctx.record()), (2, 3));
        assert!(ctx.primary().is_none());
    }
}

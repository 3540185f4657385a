use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

pub const STORE_GARMIN: &str = "garmin";
pub const STORE_MONITORING: &str = "garmin_monitoring";
pub const STORE_ACTIVITIES: &str = "garmin_activities";

#[derive(Debug, Clone)]
pub struct Data {
    pub path: PathBuf,
    pub input_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Ingest {
    /// Activity fields that an activity summary record never overwrites once
    /// they hold a value.
    pub preserve_fields: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Log {
    pub level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data: Data,
    pub ingest: Ingest,
    pub log: Log,
}

impl Default for Ingest {
    fn default() -> Self {
        Ingest {
            preserve_fields: vec!["sport".to_string(), "sub_sport".to_string()],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: Data {
                path: PathBuf::from("./data"),
                input_dir: PathBuf::from("."),
            },
            ingest: Ingest::default(),
            log: Log {
                level: LevelFilter::INFO,
            },
        }
    }
}

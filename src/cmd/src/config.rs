use std::path::Path;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::error::Result;

/// Prefix of environment variables overriding the config file, e.g.
/// `HEALTHDB_DATA__PATH=/var/lib/healthdb`.
pub const ENV_PREFIX: &str = "HEALTHDB";

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub path: PathBuf,
    pub input_dir: PathBuf,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Ingest {
    pub preserve_fields: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub data: Data,
    pub ingest: Ingest,
    pub log: Log,
}

impl Config {
    /// Defaults, overridden by `path` when given, overridden by the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = common::config::Config::default();
        let mut builder = config::Config::builder()
            .set_default("data.path", defaults.data.path.to_string_lossy().to_string())?
            .set_default(
                "data.input_dir",
                defaults.data.input_dir.to_string_lossy().to_string(),
            )?
            .set_default("ingest.preserve_fields", defaults.ingest.preserve_fields)?
            .set_default("log.level", "info")?;
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let cfg = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

impl TryInto<common::config::Config> for Config {
    type Error = crate::error::Error;

    fn try_into(self) -> std::result::Result<common::config::Config, Self::Error> {
        Ok(common::config::Config {
            data: common::config::Data {
                path: self.data.path,
                input_dir: self.data.input_dir,
            },
            ingest: common::config::Ingest {
                preserve_fields: self.ingest.preserve_fields,
            },
            log: common::config::Log {
                level: self.log.level.into(),
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}

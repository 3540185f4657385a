use std::result;

use healthdb::error::DbError;
use ingester::error::IngesterError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{failed} of {total} files failed to import")]
    ImportFailed { failed: usize, total: usize },
    #[error("ingester: {0}")]
    Ingester(#[from] IngesterError),
    #[error("db: {0:?}")]
    Db(#[from] DbError),
    #[error("config: {0:?}")]
    Config(#[from] config::ConfigError),
    #[error("scan dir: {0}")]
    ScanDir(String),
    #[error("progress template: {0:?}")]
    Template(#[from] indicatif::style::TemplateError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("set global default: {0:?}")]
    SetGlobalDefaultError(#[from] SetGlobalDefaultError),
}

use std::result;

use common::error::CommonError;
use thiserror::Error;

pub type Result<T> = result::Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("missing key {0:?}")]
    MissingKey(String),
    #[error("invalid value {0:?}")]
    InvalidValue(String),
    #[error("unknown column {0:?}")]
    UnknownColumn(String),
    #[error("rocksdb: {0:?}")]
    RocksDb(#[from] rocksdb::Error),
    #[error("bincode {0:?}")]
    Bincode(#[from] bincode::Error),
    #[error("common {0:?}")]
    Common(#[from] CommonError),
}

impl DbError {
    /// Errors caused by the data handed to the store rather than by the store
    /// itself.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            DbError::MissingKey(_)
                | DbError::InvalidValue(_)
                | DbError::UnknownColumn(_)
                | DbError::Common(CommonError::InvalidKey(_))
        )
    }
}

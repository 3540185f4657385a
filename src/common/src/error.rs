use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, CommonError>;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("invalid key value: {0}")]
    InvalidKey(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("serde: {0:?}")]
    Serde(#[from] serde_json::Error),
}

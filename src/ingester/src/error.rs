use std::path::PathBuf;
use std::result;

use common::error::CommonError;
use healthdb::error::DbError;
use thiserror::Error;

pub type Result<T> = result::Result<T, IngesterError>;

#[derive(Error, Debug)]
pub enum IngesterError {
    #[error("malformed {record_type} record: {reason}")]
    Malformed { record_type: String, reason: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("db: {0:?}")]
    Db(#[from] DbError),
    #[error("common: {0:?}")]
    Common(#[from] CommonError),
    #[error("io: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("serde: {0:?}")]
    Serde(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<IngesterError>,
    },
}

impl IngesterError {
    pub fn malformed(record_type: impl ToString, reason: impl ToString) -> Self {
        IngesterError::Malformed {
            record_type: record_type.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Errors caused by the content of a single record. The record is skipped
    /// and processing of the file goes on.
    pub fn is_record_level(&self) -> bool {
        match self {
            IngesterError::Malformed { .. } => true,
            IngesterError::Db(err) => err.is_data_error(),
            IngesterError::Common(CommonError::InvalidKey(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_classification() {
        assert!(IngesterError::malformed("lap", "bad").is_record_level());
        assert!(IngesterError::Db(DbError::MissingKey("x".to_string())).is_record_level());
        assert!(!IngesterError::Decode("truncated".to_string()).is_record_level());

        let wrapped = IngesterError::File {
            path: PathBuf::from("a.fit"),
            source: Box::new(IngesterError::malformed("lap", "bad")),
        };
        assert!(!wrapped.is_record_level());
        assert_eq!(wrapped.to_string(), "a.fit: malformed lap record: bad");
    }
}

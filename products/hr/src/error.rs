use thiserror::Error;

/// Failures writing the persisted collection.
///
/// Reads never fail: a missing or unreadable slot loads as an empty
/// collection. Only writes can surface an error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode employees for slot `{slot}`")]
    Encode {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write storage slot `{slot}`")]
    Write {
        slot: String,
        #[source]
        source: std::io::Error,
    },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Submitted form values that do not have the shape of an employee record.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("form is not open")]
    NotOpen,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid date in `{field}`: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("unknown {kind} `{value}`")]
    UnknownOption { kind: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum HrError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Form(#[from] FormError),
}

pub type HrResult<T> = Result<T, HrError>;

use thiserror::Error;

/// Failures surfaced by the record store. Everything here is a boundary
/// error: callers turn it into a user-facing message and carry on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} already exists")]
    DuplicateKey(u64),

    #[error("record {0} not found")]
    NotFound(u64),

    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file corrupt: {0}")]
    Corrupt(String),

    #[error("store file encoding failure: {0}")]
    Codec(#[from] bincode::Error),
}

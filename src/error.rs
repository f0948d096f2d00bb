use thiserror::Error;

/// Failures inside the durable store.
///
/// These never cross the crate's public contract: the store trait is
/// fail-open, so they are logged and absorbed at that boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

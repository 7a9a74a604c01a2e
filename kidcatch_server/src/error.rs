// Errors that stop the server from starting. Per-request failures never
// surface here; handlers turn them into JSON error responses.

use thiserror::Error;

use kidcatch_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("bound address {0} is not an IP socket")]
    NotIpAddress(String),

    #[error("failed to open game store: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("Failed to read process memory at address {address:#x}: {message}")]
    MemoryReadFailed { address: u64, message: String },

    #[error("Not attached to a process")]
    NotAttached,

    #[error("Invalid memory layout: {0}")]
    InvalidLayout(String),

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("Invalid published payload: {0}")]
    InvalidPayload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

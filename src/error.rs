use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotonError {
    #[error("Invalid Headers JSON format")]
    InvalidHeaders,

    #[error("Request name is required")]
    EmptyName,

    #[error("Invalid collection document: {0}")]
    InvalidCollection(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for photon crate
pub type Result<T> = std::result::Result<T, PhotonError>;

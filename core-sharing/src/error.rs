use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharingError {
    #[error("Document store unreachable: {0}")]
    Network(String),

    #[error("Invitation not found: {0}")]
    NotFound(String),

    #[error("Document update conflict: {0}")]
    Conflict(String),

    #[error("Document store error (HTTP {status}): {body}")]
    Store { status: u16, body: String },

    #[error("Failed to parse document store response: {0}")]
    Parse(String),

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, SharingError>;

use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to parse catalog payload: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Catalog entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Catalog provider rejected credentials: {0}")]
    Unauthorized(String),

    #[error("Catalog provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

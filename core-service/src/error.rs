use core_catalog::CatalogError;
use core_sharing::SharingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("No route for '{0}'")]
    UnknownRoute(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Sharing error: {0}")]
    Sharing(#[from] SharingError),
}

impl CoreError {
    /// True when the caller sent a bad request rather than a dependency failing
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::MissingParameter(_)
                | CoreError::InvalidParameter { .. }
                | CoreError::UnknownRoute(_)
                | CoreError::Catalog(CatalogError::NotFound { .. })
                | CoreError::Sharing(
                    SharingError::NotFound(_)
                        | SharingError::InvalidInput { .. }
                        | SharingError::Forbidden(_)
                        | SharingError::Conflict(_)
                )
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

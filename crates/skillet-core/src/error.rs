use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No recipe with id {0}")]
    NotFound(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

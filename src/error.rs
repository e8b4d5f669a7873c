use thiserror::Error;

/// Failures talking to the backend, as the UI reports them
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never got an answer
    #[error("Connection error")]
    Connection(#[source] reqwest::Error),

    /// The backend answered with an error message meant for the user
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The worker thread went away before reporting back
    #[error("Request was cancelled")]
    Canceled,
}

impl From<crate::backend::ApiError> for GatewayError {
    fn from(error: crate::backend::ApiError) -> Self {
        GatewayError::Rejected(error.to_string())
    }
}

/// Failures turning the canvas into a payload or a payload into pixels
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Canvas is empty")]
    EmptySurface,

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Not an image data URL")]
    NotDataUrl,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

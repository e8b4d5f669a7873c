use thiserror::Error;

use super::api::ErrorBody;
use super::store::StoreError;

/// Rejections produced by the ingestion and moderation rules.
///
/// The display text is the message shown to the user.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid user")]
    InvalidUser,

    #[error("Invalid image format")]
    InvalidImageFormat,

    #[error("Image too large (max 5MB)")]
    ImageTooLarge,

    #[error("Corrupt or invalid image")]
    CorruptImage,

    #[error("You have reached the limit of {0} pumpkins")]
    QuotaExceeded(usize),

    #[error("Wrong admin password")]
    WrongPassword,

    #[error("Invalid action")]
    InvalidAction,

    #[error("Pumpkin id required")]
    MissingId,

    #[error("Failed to check user limit")]
    UserCount(#[source] StoreError),

    #[error("Failed to check IP limit")]
    IpCount(#[source] StoreError),

    #[error("Failed to save the pumpkin")]
    Insert(#[source] StoreError),

    #[error("{0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// HTTP status a hosted function answers with
    pub fn status(&self) -> u16 {
        match self {
            ApiError::InvalidUser
            | ApiError::InvalidImageFormat
            | ApiError::ImageTooLarge
            | ApiError::CorruptImage
            | ApiError::InvalidAction
            | ApiError::MissingId => 400,
            ApiError::QuotaExceeded(_) | ApiError::WrongPassword => 403,
            ApiError::UserCount(_) | ApiError::IpCount(_) | ApiError::Insert(_) | ApiError::Storage(_) => 500,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

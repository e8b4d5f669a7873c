//! Ingestion and moderation rules for submitted pumpkins.
//!
//! Submissions land hidden (`visible = false`) and only show up in the garden
//! once an administrator approves them. Each client id and each IP may store
//! at most [`BackendConfig::max_per_client`] pumpkins; the limit is enforced by
//! exact counts before the insert.

pub mod api;
mod error;
mod ingest;
mod moderate;
pub mod store;

pub use api::{
    GalleryItem, ModerationAction, ModerationRequest, Origin, SubmitReceipt, SubmitRequest, SubmitResponse,
};
pub use error::ApiError;
pub use ingest::{has_image_prefix, validate_submission, IMAGE_FORMATS, MAX_IMAGE_CHARS, MIN_USER_ID_LEN};
pub use store::{MemoryStore, PumpkinStore, StoreError};

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub admin_password: String,
    pub max_per_client: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            admin_password: AppConfig::DEFAULT_ADMIN_PASSWORD.to_string(),
            max_per_client: AppConfig::DEFAULT_MAX_PER_CLIENT,
        }
    }
}

impl From<&AppConfig> for BackendConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            admin_password: config.admin_password.clone(),
            max_per_client: config.max_per_client,
        }
    }
}

pub struct Backend<S> {
    store: S,
    config: BackendConfig,
}

impl<S: PumpkinStore> Backend<S> {
    pub fn new(store: S, config: BackendConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}

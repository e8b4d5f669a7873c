use super::{Gateway, GatewayResult};
use crate::backend::{
    Backend, BackendConfig, GalleryItem, MemoryStore, ModerationRequest, Origin, SubmitReceipt, SubmitRequest,
};

/// Offline mode: the backend rules run in-process over a [`MemoryStore`]
pub struct LocalGateway {
    backend: Backend<MemoryStore>,
    origin: Origin,
}

impl LocalGateway {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            backend: Backend::new(MemoryStore::new(), config),
            origin: Origin {
                forwarded_for: None,
                real_ip: Some("127.0.0.1".to_string()),
            },
        }
    }

    pub fn backend(&self) -> &Backend<MemoryStore> {
        &self.backend
    }
}

impl Gateway for LocalGateway {
    fn submit(&self, request: &SubmitRequest) -> GatewayResult<SubmitReceipt> {
        Ok(self.backend.submit(request, &self.origin)?.into())
    }

    fn fetch_pumpkins(&self, visible: bool) -> GatewayResult<Vec<GalleryItem>> {
        Ok(self.backend.list(visible)?)
    }

    fn moderate(&self, request: &ModerationRequest) -> GatewayResult<()> {
        self.backend.moderate(request)?;
        Ok(())
    }
}

//! How the app reaches the backend.
//!
//! Calls block, so the UI runs each one on a short-lived worker thread via
//! [`Pending::spawn`] and polls the result once per frame.

mod http;
mod local;

pub use http::HttpGateway;
pub use local::LocalGateway;

use std::sync::Arc;

use futures::channel::oneshot;

use crate::backend::{GalleryItem, ModerationRequest, SubmitReceipt, SubmitRequest};
use crate::config::AppConfig;
use crate::error::GatewayError;

pub type GatewayResult<T> = Result<T, GatewayError>;

pub trait Gateway: Send + Sync {
    /// Send a drawing to the moderation-gated ingestion endpoint
    fn submit(&self, request: &SubmitRequest) -> GatewayResult<SubmitReceipt>;

    /// Pumpkins with the given visibility, newest first
    fn fetch_pumpkins(&self, visible: bool) -> GatewayResult<Vec<GalleryItem>>;

    /// Approve or reject one pumpkin
    fn moderate(&self, request: &ModerationRequest) -> GatewayResult<()>;
}

/// Pick the hosted backend when a URL is configured, otherwise run offline
pub fn from_config(config: &AppConfig) -> Arc<dyn Gateway> {
    match &config.api_url {
        Some(url) => {
            log::info!("Using hosted backend at {url}");
            Arc::new(HttpGateway::new(url.clone(), config.api_key.clone()))
        }
        None => Arc::new(LocalGateway::new(config.into())),
    }
}

/// Result of a gateway call running on a worker thread
pub struct Pending<T> {
    receiver: oneshot::Receiver<GatewayResult<T>>,
}

impl<T: Send + 'static> Pending<T> {
    /// Run `job` off the UI thread; `ctx` is asked to repaint once it finishes
    pub fn spawn<F>(ctx: &egui::Context, job: F) -> Self
    where
        F: FnOnce() -> GatewayResult<T> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            // The receiver may be gone if the UI dropped the request.
            let _ = sender.send(job());
            ctx.request_repaint();
        });
        Self { receiver }
    }

    /// `None` while the call is still running
    pub fn poll(&mut self) -> Option<GatewayResult<T>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(GatewayError::Canceled)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn wait<T: Send + 'static>(mut pending: Pending<T>) -> GatewayResult<T> {
        for _ in 0..500 {
            if let Some(result) = pending.poll() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("pending call never finished");
    }

    #[test]
    fn test_pending_delivers_result() {
        let ctx = egui::Context::default();
        let pending = Pending::spawn(&ctx, || Ok(42));
        assert_eq!(wait(pending).unwrap(), 42);
    }

    #[test]
    fn test_pending_delivers_error() {
        let ctx = egui::Context::default();
        let pending: Pending<()> = Pending::spawn(&ctx, || Err(GatewayError::Rejected("nope".into())));
        assert_eq!(wait(pending).unwrap_err().to_string(), "nope");
    }

    #[test]
    fn test_offline_config_uses_local_gateway() {
        let gateway = from_config(&AppConfig::default());
        assert!(gateway.fetch_pumpkins(true).unwrap().is_empty());
    }
}

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::{DeserializeOwned, IgnoredAny};

use super::{Gateway, GatewayResult};
use crate::backend::api::ErrorBody;
use crate::backend::{GalleryItem, ModerationRequest, SubmitReceipt, SubmitRequest};
use crate::error::GatewayError;

const TABLE: &str = "calabazas";
const TIMEOUT: Duration = Duration::from_secs(20);

/// Hosted backend: ingestion and moderation functions plus a REST view of the table
pub struct HttpGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder().timeout(TIMEOUT).build().unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {e}");
            Client::new()
        });
        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{name}", self.base_url)
    }

    fn table_url(&self, visible: bool) -> String {
        format!(
            "{}/rest/v1/{TABLE}?select=id,img&visible=eq.{visible}&order=id.desc",
            self.base_url
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        self.authorize(request).send().map_err(|e| {
            log::error!("Request failed: {e}");
            GatewayError::Connection(e)
        })
    }
}

/// Decode a success body, or turn an error body into [`GatewayError::Rejected`]
fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> GatewayResult<T> {
    let status = response.status();
    let text = response.text().map_err(GatewayError::Connection)?;

    if !status.is_success() {
        return Err(GatewayError::Rejected(error_message(&text).unwrap_or_else(|| fallback.to_string())));
    }
    serde_json::from_str(&text).map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Functions answer `{"error": ...}`, the REST endpoint `{"message": ...}`
fn error_message(body: &str) -> Option<String> {
    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(body) {
        return Some(error);
    }
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

impl Gateway for HttpGateway {
    fn submit(&self, request: &SubmitRequest) -> GatewayResult<SubmitReceipt> {
        let response = self.send(self.client.post(self.function_url("validate-pumpkin")).json(request))?;
        read_json(response, "Error saving the pumpkin")
    }

    fn fetch_pumpkins(&self, visible: bool) -> GatewayResult<Vec<GalleryItem>> {
        let response = self.send(self.client.get(self.table_url(visible)))?;
        read_json(response, "Error loading the garden")
    }

    fn moderate(&self, request: &ModerationRequest) -> GatewayResult<()> {
        let response = self.send(self.client.post(self.function_url("moderate-pumpkin")).json(request))?;
        let _: IgnoredAny = read_json(response, "Error moderating the pumpkin")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let gateway = HttpGateway::new("https://example.test".into(), "key".into());
        assert_eq!(
            gateway.function_url("validate-pumpkin"),
            "https://example.test/functions/v1/validate-pumpkin"
        );
        assert_eq!(
            gateway.table_url(true),
            "https://example.test/rest/v1/calabazas?select=id,img&visible=eq.true&order=id.desc"
        );
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"error":"Invalid user"}"#).as_deref(), Some("Invalid user"));
        assert_eq!(
            error_message(r#"{"code":"42501","message":"permission denied"}"#).as_deref(),
            Some("permission denied")
        );
        assert_eq!(error_message("<html>"), None);
    }
}

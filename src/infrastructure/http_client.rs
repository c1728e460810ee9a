use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::domain::KeyError;

/// Default bound on a single round-trip to the key service
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for HTTP client operations (for mocking)
///
/// Implementations classify failures into the key error taxonomy:
/// 401/403 map to [`KeyError::Auth`], any other non-2xx to
/// [`KeyError::Server`], transport failures and timeouts to
/// [`KeyError::Network`], and a 2xx body that is not JSON to
/// [`KeyError::Decode`].
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, KeyError>;

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, KeyError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, KeyError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, KeyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KeyError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, KeyError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received HTTP response");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_slice(&body)
            .map_err(|e| KeyError::decode(format!("Response is not valid JSON: {}", e)))
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, KeyError> {
        let mut request = self.client.get(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, KeyError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        self.send(request.json(body)).await
    }
}

fn transport_error(error: reqwest::Error) -> KeyError {
    if error.is_timeout() {
        KeyError::network(format!("Request timed out: {}", error))
    } else {
        KeyError::network(format!("Request failed: {}", error))
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> KeyError {
    let message = server_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected status")
            .to_string()
    });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => KeyError::auth(message),
        _ => KeyError::server(status.as_u16(), message),
    }
}

/// Pull a human readable reason out of an error body
fn server_message(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        for field in ["detail", "message", "error"] {
            if let Some(text) = json.get(field).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

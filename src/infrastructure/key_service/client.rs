use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::info;

use super::wire::{
    DeleteRequest, DeleteResponse, ListKeysResponse, RegisterRequest, RegisterResponse,
};
use crate::domain::{
    ApiKeySecret, BearerCredential, DeleteAck, IssuedKey, KeyError, KeyId, KeyRecord,
    KeyService, Selection,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_BASE_URL: &str = "http://localhost:44444";

/// Key service client speaking the guardrail service's JSON API
#[derive(Debug)]
pub struct HttpKeyServiceClient<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> HttpKeyServiceClient<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn headers(authorization: &str) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", authorization),
            ("Content-Type", "application/json"),
        ]
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, json: serde_json::Value) -> Result<T, KeyError> {
    serde_json::from_value(json).map_err(|e| {
        KeyError::decode(format!("Unexpected response from {}: {}", endpoint, e))
    })
}

fn encode<T: serde::Serialize>(body: &T) -> Result<serde_json::Value, KeyError> {
    serde_json::to_value(body)
        .map_err(|e| KeyError::validation(format!("Failed to encode request: {}", e)))
}

#[async_trait]
impl<C: HttpClientTrait> KeyService for HttpKeyServiceClient<C> {
    async fn list(&self, credential: &BearerCredential) -> Result<Vec<KeyRecord>, KeyError> {
        let authorization = credential.authorization_header();
        let json = self
            .client
            .get_json(&self.url("prev_keys"), Self::headers(&authorization))
            .await?;

        let response: ListKeysResponse = decode("/prev_keys", json)?;
        info!(count = response.api_keys.len(), "Listed issued keys");

        Ok(response.api_keys.into_iter().map(KeyRecord::from).collect())
    }

    async fn create(
        &self,
        credential: &BearerCredential,
        selection: &Selection,
    ) -> Result<IssuedKey, KeyError> {
        let authorization = credential.authorization_header();
        let body = encode(&RegisterRequest {
            input_validators: selection.input_validators(),
            output_validators: selection.output_validators(),
            selected_model: selection.model_id(),
        })?;

        let json = self
            .client
            .post_json(&self.url("register"), Self::headers(&authorization), &body)
            .await?;

        let response: RegisterResponse = decode("/register", json)?;
        info!(
            input = selection.input_validators().len(),
            output = selection.output_validators().len(),
            "Registered new key"
        );

        Ok(IssuedKey {
            key_id: response.key_id,
            api_key: ApiKeySecret::new(response.api_key),
            input_validators: selection.input_validators().to_vec(),
            output_validators: selection.output_validators().to_vec(),
            model_id: selection.model_id().cloned(),
        })
    }

    async fn delete(
        &self,
        credential: &BearerCredential,
        key_id: &KeyId,
    ) -> Result<DeleteAck, KeyError> {
        let authorization = credential.authorization_header();
        let body = encode(&DeleteRequest { key_id })?;

        let json = self
            .client
            .post_json(&self.url("delete_keys"), Self::headers(&authorization), &body)
            .await?;

        let response: DeleteResponse = decode("/delete_keys", json)?;
        info!(key_id = %key_id, "Deleted key");

        Ok(DeleteAck {
            message: response.message,
        })
    }
}

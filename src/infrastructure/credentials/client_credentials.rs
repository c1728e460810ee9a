use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{BearerCredential, CredentialProvider, KeyError};
use crate::infrastructure::http_client::HttpClientTrait;

/// Settings for an OAuth2 client-credentials grant
#[derive(Clone, Deserialize)]
pub struct ClientCredentialsConfig {
    /// Tenant domain, e.g. `example.eu.auth0.com`
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentialsConfig {
    pub fn token_url(&self) -> String {
        let domain = self.domain.trim_end_matches('/');

        if domain.starts_with("http://") || domain.starts_with("https://") {
            format!("{}/oauth/token", domain)
        } else {
            format!("https://{}/oauth/token", domain)
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.domain.trim().is_empty()
            && !self.client_id.trim().is_empty()
            && !self.client_secret.trim().is_empty()
    }
}

impl std::fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("domain", &self.domain)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Obtains access tokens from the identity provider's token endpoint
#[derive(Debug)]
pub struct ClientCredentialsProvider<C: HttpClientTrait> {
    client: C,
    config: ClientCredentialsConfig,
}

impl<C: HttpClientTrait> ClientCredentialsProvider<C> {
    pub fn new(client: C, config: ClientCredentialsConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl<C: HttpClientTrait> CredentialProvider for ClientCredentialsProvider<C> {
    async fn acquire_credential(
        &self,
        audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError> {
        let mut body = serde_json::json!({
            "grant_type": "client_credentials",
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
        });

        if let Some(audience) = audience {
            body["audience"] = serde_json::json!(audience);
        }

        debug!(domain = %self.config.domain, audience = ?audience, "Requesting access token");

        let json = self
            .client
            .post_json(
                &self.config.token_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await
            .map_err(|e| match e {
                // Any rejection by the token endpoint means no usable session
                KeyError::Server { status, message } => {
                    warn!(status, "Token endpoint rejected the request");
                    KeyError::auth(format!("Token request rejected ({}): {}", status, message))
                }
                other => other,
            })?;

        let response: TokenResponse = serde_json::from_value(json)
            .map_err(|e| KeyError::decode(format!("Unexpected token response: {}", e)))?;

        let mut credential = BearerCredential::new(response.access_token);

        if let Some(expires_in) = response.expires_in {
            credential = credential.with_expiration(Utc::now() + Duration::seconds(expires_in));
        }

        Ok(credential)
    }

    fn provider_name(&self) -> &'static str {
        "client_credentials"
    }
}

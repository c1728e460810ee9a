//! Wiring of configuration, credentials and the key service for a CLI run

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use super::Cli;
use crate::config::AppConfig;
use crate::controller::{ControllerSettings, KeyLifecycleController};
use crate::domain::{CredentialProvider, ValidatorCatalog};
use crate::infrastructure::credentials::{
    CachedCredentialProvider, ClientCredentialsProvider, EnvCredentialProvider,
    StaticCredentialProvider,
};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::key_service::HttpKeyServiceClient;
use crate::infrastructure::logging;

pub type CliController =
    KeyLifecycleController<HttpKeyServiceClient<HttpClient>, Arc<dyn CredentialProvider>>;

/// Load configuration and apply command line overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().context("Failed to load configuration")?;

    if let Some(base_url) = &cli.base_url {
        config.service.base_url = base_url.clone();
        config.validate().context("Invalid --base-url")?;
    }

    Ok(config)
}

pub fn init_logging(config: &AppConfig) {
    logging::init_logging(&config.logging);
}

/// Pick the credential source: explicit token, OAuth client credentials,
/// or a token in the environment
pub fn build_credentials(
    config: &AppConfig,
    token: Option<String>,
) -> anyhow::Result<Arc<dyn CredentialProvider>> {
    let provider: Arc<dyn CredentialProvider> = match (token, &config.auth.oauth) {
        (Some(token), _) => Arc::new(StaticCredentialProvider::new(token)),
        (None, Some(oauth)) => {
            let client = HttpClient::with_timeout(config.timeout())?;
            Arc::new(ClientCredentialsProvider::new(client, oauth.clone()))
        }
        (None, None) => Arc::new(EnvCredentialProvider::new(config.auth.token_env.clone())),
    };

    info!(provider = provider.provider_name(), "Using credential provider");

    if config.auth.cache_ttl_secs > 0 {
        let ttl = Duration::from_secs(config.auth.cache_ttl_secs);
        return Ok(Arc::new(CachedCredentialProvider::new(provider, ttl)));
    }

    Ok(provider)
}

pub fn build_controller(
    config: &AppConfig,
    token: Option<String>,
    catalog: ValidatorCatalog,
) -> anyhow::Result<CliController> {
    let credentials = build_credentials(config, token)?;
    let client = HttpClient::with_timeout(config.timeout())?;
    let service = HttpKeyServiceClient::with_base_url(client, &config.service.base_url);

    info!(base_url = %service.base_url(), "Using key service");

    Ok(KeyLifecycleController::with_settings(
        service,
        credentials,
        catalog,
        ControllerSettings {
            audience: config.auth.audience.clone(),
            require_model: config.service.require_model,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_token_wins() {
        let mut config = AppConfig::default();
        config.auth.token_env = "NONEXISTENT_GUARDRAIL_VAR_777".to_string();

        let provider = build_credentials(&config, Some("cli-token".to_string())).unwrap();
        let cred = provider.acquire_credential(None).await.unwrap();

        assert_eq!(provider.provider_name(), "static");
        assert_eq!(cred.token(), "cli-token");
    }

    #[tokio::test]
    async fn test_env_provider_by_default() {
        let mut config = AppConfig::default();
        config.auth.token_env = "NONEXISTENT_GUARDRAIL_VAR_778".to_string();

        let provider = build_credentials(&config, None).unwrap();

        assert_eq!(provider.provider_name(), "env");
        assert!(provider.acquire_credential(None).await.is_err());
    }

    #[test]
    fn test_cached_provider_keeps_inner_name() {
        let mut config = AppConfig::default();
        config.auth.cache_ttl_secs = 60;

        let provider = build_credentials(&config, Some("tok".to_string())).unwrap();

        assert_eq!(provider.provider_name(), "static");
    }

    #[test]
    fn test_build_controller_uses_settings() {
        let mut config = AppConfig::default();
        config.service.require_model = false;
        config.auth.audience = Some("https://guardrails.example".to_string());

        let controller =
            build_controller(&config, Some("tok".to_string()), ValidatorCatalog::builtin())
                .unwrap();

        assert!(!controller.settings().require_model);
        assert_eq!(
            controller.settings().audience.as_deref(),
            Some("https://guardrails.example")
        );
    }
}

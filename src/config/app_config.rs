use serde::Deserialize;

use crate::infrastructure::credentials::ClientCredentialsConfig;

const ENV_PREFIX: &str = "GUARDRAIL_KEYS";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Where the key service lives and how long to wait for it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Model-aware deployments refuse submissions without a model
    pub require_model: bool,
}

/// How bearer credentials are obtained
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub audience: Option<String>,
    pub token_env: String,
    pub oauth: Option<ClientCredentialsConfig>,
    /// Zero disables credential caching
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:44444".to_string(),
            timeout_secs: 30,
            require_model: true,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            audience: None,
            token_env: "GUARDRAIL_KEYS_TOKEN".to_string(),
            oauth: None,
            cache_ttl_secs: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work at all
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.service.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "service.base_url must not be empty".to_string(),
            ));
        }

        if self.service.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "service.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if let Some(oauth) = &self.auth.oauth {
            if !oauth.is_complete() {
                return Err(config::ConfigError::Message(
                    "auth.oauth requires domain, client_id and client_secret".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.service.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<AppConfig, config::ConfigError> {
        AppConfig::from_builder(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.service.base_url, "http://localhost:44444");
        assert!(config.service.require_model);
        assert_eq!(config.auth.token_env, "GUARDRAIL_KEYS_TOKEN");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [service]
            base_url = "https://keys.example.com"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "https://keys.example.com");
        assert_eq!(config.service.timeout_secs, 30);
        assert!(matches!(config.logging.format, LogFormat::Json));
    }

    #[test]
    fn test_oauth_section() {
        let config = from_toml(
            r#"
            [auth]
            audience = "https://guardrails.example"
            cache_ttl_secs = 300

            [auth.oauth]
            domain = "tenant.auth0.com"
            client_id = "cid"
            client_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.audience.as_deref(), Some("https://guardrails.example"));
        assert_eq!(config.auth.cache_ttl_secs, 300);
        assert!(config.auth.oauth.is_some());
    }

    #[test]
    fn test_incomplete_oauth_rejected() {
        let result = from_toml(
            r#"
            [auth.oauth]
            domain = "tenant.auth0.com"
            client_id = ""
            client_secret = "secret"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = AppConfig::default();
        config.service.base_url = " ".to_string();

        assert!(config.validate().is_err());
    }
}

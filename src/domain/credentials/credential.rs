use chrono::{DateTime, Utc};

/// Bearer token presented to the key service
#[derive(Clone)]
pub struct BearerCredential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.map(|exp| Utc::now() >= exp).unwrap_or(false)
    }
}

impl std::fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerCredential")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_credential_not_expired() {
        let cred = BearerCredential::new("token")
            .with_expiration(Utc::now() + Duration::hours(1));

        assert!(!cred.is_expired());
        assert_eq!(cred.authorization_header(), "Bearer token");
    }

    #[test]
    fn test_credential_expired() {
        let cred = BearerCredential::new("token")
            .with_expiration(Utc::now() - Duration::hours(1));

        assert!(cred.is_expired());
    }

    #[test]
    fn test_credential_without_expiry() {
        assert!(!BearerCredential::new("token").is_expired());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", BearerCredential::new("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}

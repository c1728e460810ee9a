use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{BearerCredential, CredentialProvider, KeyError};

/// Cache key for credentials; `None` audience shares one slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey(Option<String>);

/// Credential provider wrapper that adds caching with TTL
#[derive(Debug)]
pub struct CachedCredentialProvider<P: CredentialProvider> {
    inner: P,
    cache: Cache<CacheKey, Arc<BearerCredential>>,
}

impl<P: CredentialProvider> CachedCredentialProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(16)
            .build();

        Self { inner, cache }
    }

    /// Drop the cached credential for an audience
    pub async fn invalidate(&self, audience: Option<&str>) {
        self.cache
            .invalidate(&CacheKey(audience.map(str::to_string)))
            .await;
    }
}

#[async_trait]
impl<P: CredentialProvider> CredentialProvider for CachedCredentialProvider<P> {
    async fn acquire_credential(
        &self,
        audience: Option<&str>,
    ) -> Result<BearerCredential, KeyError> {
        let key = CacheKey(audience.map(str::to_string));

        if let Some(cached) = self.cache.get(&key).await {
            if !cached.is_expired() {
                tracing::debug!(
                    provider = self.inner.provider_name(),
                    audience = ?audience,
                    "Cache hit for credential"
                );
                return Ok((*cached).clone());
            }

            self.cache.invalidate(&key).await;
        }

        tracing::debug!(
            provider = self.inner.provider_name(),
            audience = ?audience,
            "Cache miss, acquiring credential"
        );

        let credential = self.inner.acquire_credential(audience).await?;
        self.cache.insert(key, Arc::new(credential.clone())).await;

        Ok(credential)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::mock::MockCredentialProvider;
    use crate::domain::ErrorKind;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct ExpiringProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CredentialProvider for ExpiringProvider {
        async fn acquire_credential(
            &self,
            _audience: Option<&str>,
        ) -> Result<BearerCredential, KeyError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(BearerCredential::new(format!("tok-{}", n))
                .with_expiration(Utc::now() - chrono::Duration::seconds(1)))
        }

        fn provider_name(&self) -> &'static str {
            "expiring"
        }
    }

    #[tokio::test]
    async fn test_cached_provider_caches_credentials() {
        let cached = CachedCredentialProvider::new(
            MockCredentialProvider::with_token("tok"),
            Duration::from_secs(60),
        );

        let cred1 = cached.acquire_credential(Some("aud")).await.unwrap();
        let cred2 = cached.acquire_credential(Some("aud")).await.unwrap();

        assert_eq!(cred1.token(), "tok");
        assert_eq!(cred2.token(), "tok");
        assert_eq!(cached.inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_audiences_cached_separately() {
        let cached = CachedCredentialProvider::new(
            MockCredentialProvider::with_token("tok"),
            Duration::from_secs(60),
        );

        cached.acquire_credential(Some("a")).await.unwrap();
        cached.acquire_credential(Some("b")).await.unwrap();
        cached.acquire_credential(None).await.unwrap();

        assert_eq!(cached.inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_cached_provider_invalidation() {
        let cached = CachedCredentialProvider::new(
            MockCredentialProvider::with_token("tok"),
            Duration::from_secs(60),
        );

        cached.acquire_credential(None).await.unwrap();
        cached.invalidate(None).await;
        cached.acquire_credential(None).await.unwrap();

        assert_eq!(cached.inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_expired_credential_is_refetched() {
        let cached = CachedCredentialProvider::new(
            ExpiringProvider {
                calls: AtomicUsize::new(0),
            },
            Duration::from_secs(60),
        );

        let first = cached.acquire_credential(None).await.unwrap();
        let second = cached.acquire_credential(None).await.unwrap();

        assert_eq!(first.token(), "tok-0");
        assert_eq!(second.token(), "tok-1");
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cached = CachedCredentialProvider::new(
            MockCredentialProvider::failing(KeyError::auth("logged out")),
            Duration::from_secs(60),
        );

        for _ in 0..2 {
            let error = cached.acquire_credential(None).await.unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Auth);
        }

        assert_eq!(cached.inner.calls(), 2);
    }
}

//! Cache factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

/// Supported cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheType {
    /// In-memory cache using moka
    #[default]
    InMemory,
    /// Redis cache
    Redis,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheType::InMemory),
            "redis" => Ok(CacheType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Configuration for the cache factory
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Backend to create
    pub cache_type: CacheType,
    /// Redis URL (required for the Redis backend)
    pub redis_url: Option<String>,
    /// Key prefix for namespacing (Redis)
    pub key_prefix: Option<String>,
    /// Default TTL for entries
    pub default_ttl: Duration,
    /// Maximum capacity (in-memory)
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::InMemory,
            redis_url: None,
            key_prefix: None,
            default_ttl: Duration::from_secs(3600),
            max_capacity: 10_000,
        }
    }
}

/// Creates a cache backend from configuration
pub async fn create_cache(config: &CacheConfig) -> Result<Arc<dyn Cache>, DomainError> {
    match config.cache_type {
        CacheType::InMemory => {
            let cache = InMemoryCache::with_config(
                InMemoryCacheConfig::default()
                    .with_max_capacity(config.max_capacity)
                    .with_default_ttl(config.default_ttl),
            );

            Ok(Arc::new(cache))
        }
        CacheType::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                DomainError::configuration("Redis cache selected but no redis_url configured")
            })?;

            let mut redis_config = RedisCacheConfig::new(url);

            if let Some(prefix) = &config.key_prefix {
                redis_config = redis_config.with_key_prefix(prefix.clone());
            }

            let cache = RedisCache::new(redis_config).await?;
            Ok(Arc::new(cache))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_cache_type_from_str() {
        assert_eq!(CacheType::from_str("in_memory").unwrap(), CacheType::InMemory);
        assert_eq!(CacheType::from_str("memory").unwrap(), CacheType::InMemory);
        assert_eq!(CacheType::from_str("Redis").unwrap(), CacheType::Redis);
        assert!(CacheType::from_str("memcached").is_err());
    }

    #[tokio::test]
    async fn test_create_in_memory_cache() {
        let cache = create_cache(&CacheConfig::default()).await.unwrap();
        assert_eq!(cache.size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_redis_requires_url() {
        let config = CacheConfig {
            cache_type: CacheType::Redis,
            redis_url: None,
            ..Default::default()
        };

        assert!(create_cache(&config).await.is_err());
    }
}

//! Caching layer for computed position lists.
//!
//! Schedule times have minute precision, so every request arriving within
//! the same minute computes the identical position list. Caching by the
//! evaluated minute-of-day bounds recomputation under concurrent polling;
//! a short TTL keeps entries from surviving into the same minute of a
//! later day.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::TimeOfDay;
use crate::estimator::TrainPosition;

/// Cached position list, shared between concurrent requests.
type PositionEntry = Arc<Vec<TrainPosition>>;

/// Configuration for the position cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 16,
        }
    }
}

/// Cache of position lists keyed by the evaluated minute-of-day.
pub struct PositionCache {
    entries: MokaCache<TimeOfDay, PositionEntry>,
}

impl PositionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { entries }
    }

    /// Get the cached position list for a minute, if present.
    pub async fn get(&self, at: TimeOfDay) -> Option<PositionEntry> {
        self.entries.get(&at).await
    }

    /// Insert a computed position list.
    pub async fn insert(&self, at: TimeOfDay, entry: PositionEntry) {
        self.entries.insert(at, entry).await;
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.max_capacity, 16);
    }

    #[tokio::test]
    async fn insert_then_get() {
        let cache = PositionCache::new(&CacheConfig::default());
        let at = TimeOfDay::parse_hhmm("09:12").unwrap();

        assert!(cache.get(at).await.is_none());

        let entry = Arc::new(vec![TrainPosition {
            id: "7A".to_string(),
            name: "Argo Lawu".to_string(),
            lat: -6.2,
            lon: 106.8,
        }]);
        cache.insert(at, entry.clone()).await;

        let cached = cache.get(at).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "7A");

        // A different minute misses
        let other = TimeOfDay::parse_hhmm("09:13").unwrap();
        assert!(cache.get(other).await.is_none());
    }
}

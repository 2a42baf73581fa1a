//! Time-to-live cache for market data
//!
//! Limits provider call volume. Lives outside the numerical core, which
//! never reads from it.

use super::{BalanceSheetSnapshot, FcfHistory, MarketDataError, MarketDataProvider, Quote};
use crate::config::CacheConfig;
use crate::telemetry;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::RwLock;

/// Map whose entries expire `ttl` after insertion
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (DateTime<Utc>, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Value for `key` if it was inserted less than `ttl` before `now`
    pub fn get(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        self.entries
            .get(key)
            .filter(|(inserted, _)| now - *inserted < self.ttl)
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(key, (now, value));
    }

    /// Drop expired entries
    pub fn purge(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries.retain(|_, (inserted, _)| now - *inserted < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Provider wrapper that serves repeated requests from per-kind caches
pub struct CachedProvider<P> {
    inner: P,
    fcf: RwLock<TtlCache<(String, usize), FcfHistory>>,
    quotes: RwLock<TtlCache<String, Quote>>,
    balance_sheets: RwLock<TtlCache<String, BalanceSheetSnapshot>>,
}

impl<P: MarketDataProvider> CachedProvider<P> {
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let secs = |s: u64| {
            Duration::seconds(i64::try_from(s).unwrap_or(i64::MAX).min(i64::MAX / 1_000))
        };
        Self {
            inner,
            fcf: RwLock::new(TtlCache::new(secs(config.fcf_ttl_secs))),
            quotes: RwLock::new(TtlCache::new(secs(config.quote_ttl_secs))),
            balance_sheets: RwLock::new(TtlCache::new(secs(config.balance_sheet_ttl_secs))),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

fn normalize(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

#[async_trait]
impl<P: MarketDataProvider> MarketDataProvider for CachedProvider<P> {
    async fn fcf_history(&self, ticker: &str, limit: usize) -> Result<FcfHistory, MarketDataError> {
        let key = (normalize(ticker), limit);
        if let Some(hit) = self.fcf.read().await.get(&key, Utc::now()) {
            telemetry::record_cache_lookup("fcf_history", true);
            return Ok(hit);
        }
        telemetry::record_cache_lookup("fcf_history", false);
        let value = self.inner.fcf_history(&key.0, limit).await?;
        let mut cache = self.fcf.write().await;
        cache.purge(Utc::now());
        cache.insert(key, value.clone(), Utc::now());
        Ok(value)
    }

    async fn quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        let key = normalize(ticker);
        if let Some(hit) = self.quotes.read().await.get(&key, Utc::now()) {
            telemetry::record_cache_lookup("quote", true);
            return Ok(hit);
        }
        telemetry::record_cache_lookup("quote", false);
        let value = self.inner.quote(&key).await?;
        let mut cache = self.quotes.write().await;
        cache.purge(Utc::now());
        cache.insert(key, value.clone(), Utc::now());
        Ok(value)
    }

    async fn balance_sheet(&self, ticker: &str) -> Result<BalanceSheetSnapshot, MarketDataError> {
        let key = normalize(ticker);
        if let Some(hit) = self.balance_sheets.read().await.get(&key, Utc::now()) {
            telemetry::record_cache_lookup("balance_sheet", true);
            return Ok(hit);
        }
        telemetry::record_cache_lookup("balance_sheet", false);
        let value = self.inner.balance_sheet(&key).await?;
        let mut cache = self.balance_sheets.write().await;
        cache.purge(Utc::now());
        cache.insert(key, value.clone(), Utc::now());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_entry_expires_after_ttl() {
        let start = Utc::now();
        let mut cache = TtlCache::new(Duration::seconds(600));
        cache.insert("AAPL", 1.0, start);

        assert_eq!(cache.get(&"AAPL", start + Duration::seconds(599)), Some(1.0));
        assert_eq!(cache.get(&"AAPL", start + Duration::seconds(600)), None);
    }

    #[test]
    fn test_purge_removes_expired() {
        let start = Utc::now();
        let mut cache = TtlCache::new(Duration::seconds(10));
        cache.insert("old", 1, start);
        cache.insert("new", 2, start + Duration::seconds(8));
        cache.purge(start + Duration::seconds(12));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"new", start + Duration::seconds(12)), Some(2));
    }

    #[derive(Default)]
    struct CountingProvider {
        quotes: AtomicUsize,
    }

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        async fn fcf_history(&self, _: &str, _: usize) -> Result<FcfHistory, MarketDataError> {
            Ok(FcfHistory::default())
        }

        async fn quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
            self.quotes.fetch_add(1, Ordering::SeqCst);
            Ok(Quote {
                symbol: ticker.to_string(),
                price: 10.0,
                shares_outstanding: 1_000.0,
            })
        }

        async fn balance_sheet(
            &self,
            ticker: &str,
        ) -> Result<BalanceSheetSnapshot, MarketDataError> {
            Err(MarketDataError::NotFound(ticker.to_string()))
        }
    }

    #[tokio::test]
    async fn test_cached_provider_serves_repeat_quotes() {
        let provider = CachedProvider::new(CountingProvider::default(), &CacheConfig::default());
        let a = provider.quote("aapl").await.unwrap();
        let b = provider.quote("AAPL ").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.symbol, "AAPL");
        assert_eq!(provider.inner().quotes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_refetches() {
        let config = CacheConfig {
            quote_ttl_secs: 0,
            ..CacheConfig::default()
        };
        let provider = CachedProvider::new(CountingProvider::default(), &config);
        provider.quote("MSFT").await.unwrap();
        provider.quote("MSFT").await.unwrap();
        assert_eq!(provider.inner().quotes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let provider = CachedProvider::new(CountingProvider::default(), &CacheConfig::default());
        let result = tokio_test::block_on(provider.balance_sheet("XYZ"));
        assert!(result.is_err());
        let cached = tokio_test::block_on(provider.balance_sheets.read()).len();
        assert_eq!(cached, 0);
    }
}
